//! securepass - check, generate and share passwords from the terminal.
//!
//! Exit codes are distinct so scripts can tell an insecure password apart
//! from a check that could not be completed.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use secrecy::{ExposeSecret, SecretString};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use securepass::{
    BreachLookup, BreachStatus, GenerationPolicy, HibpClient, MessageSender, SlackSender,
    StrengthPolicy, StrengthResult, config, evaluate_strength, generate_password,
};

const EXIT_OK: u8 = 0;
const EXIT_WEAK: u8 = 1;
const EXIT_BREACHED: u8 = 2;
const EXIT_LOOKUP_FAILED: u8 = 3;
const EXIT_SEND_FAILED: u8 = 4;
const EXIT_POLICY: u8 = 5;
const EXIT_INPUT: u8 = 6;

const EXIT_EMPTY_MESSAGE: u8 = 1;
const EXIT_SLACK_FAILED: u8 = 2;

const RECOMMENDED_LENGTH: std::ops::RangeInclusive<usize> = 16..=24;

/// Secure Password Strength & Distribution System
#[derive(Parser, Debug)]
#[command(name = "securepass", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check password strength and breaches
    Check(CheckArgs),
    /// Generate a strong random password
    Generate(GenerateArgs),
    /// Send an arbitrary secret message to Slack
    Slack(SlackArgs),
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Password to check (omit to prompt)
    #[arg(long)]
    password: Option<String>,

    /// Minimum length
    #[arg(long, default_value_t = securepass::DEFAULT_MIN_LENGTH)]
    min_length: usize,

    /// Do not require all character classes
    #[arg(long)]
    no_sets: bool,

    /// Also check against HIBP using k-anonymity
    #[arg(long)]
    hibp: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Password length (recommended 16-24)
    #[arg(long, default_value_t = securepass::DEFAULT_GENERATED_LENGTH)]
    length: usize,

    /// Disallow symbols
    #[arg(long)]
    no_symbols: bool,

    /// Do not require digits
    #[arg(long)]
    no_digits: bool,

    /// Do not require uppercase
    #[arg(long)]
    no_upper: bool,

    /// Do not require lowercase
    #[arg(long)]
    no_lower: bool,

    /// Print the generated password to stdout
    #[arg(long)]
    show: bool,

    /// Send generated password to Slack (webhook if no channel is set)
    #[arg(long)]
    slack: bool,

    /// Slack channel ID for bot-token sending (uses SLACK_BOT_TOKEN)
    #[arg(long)]
    channel: Option<String>,
}

#[derive(Args, Debug)]
struct SlackArgs {
    /// The message to send
    message: Option<String>,

    /// Slack channel ID for bot-token sending (uses SLACK_BOT_TOKEN)
    #[arg(long)]
    channel: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout stays clean for --show
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Check(args) => cmd_check(args).await,
        Commands::Generate(args) => cmd_generate(args).await,
        Commands::Slack(args) => cmd_slack(args).await,
    };
    ExitCode::from(code)
}

async fn cmd_check(args: CheckArgs) -> u8 {
    let password = match args.password {
        Some(p) => SecretString::new(p.into()),
        None => match inquire::Password::new("Enter password to check (input hidden):")
            .without_confirmation()
            .prompt()
        {
            Ok(p) => SecretString::new(p.into()),
            Err(e) => {
                eprintln!("Could not read password: {}", e);
                return EXIT_INPUT;
            }
        },
    };

    let policy = StrengthPolicy::new(args.min_length, !args.no_sets);
    let result = evaluate_strength(&password, &policy);
    if result.feedback.is_empty() {
        println!("Strength checks passed.");
    } else {
        println!("Strength feedback:");
        for f in &result.feedback {
            println!("- {}", f);
        }
    }

    let breach = if args.hibp {
        Some(lookup_breach(&password).await)
    } else {
        None
    };
    match &breach {
        Some(Ok(status)) if status.found => {
            println!("Found in breach database {} times.", status.count);
        }
        Some(Ok(_)) => println!("Not found in HIBP breach database."),
        Some(Err(e)) => {
            tracing::error!("breach lookup failed: {}", e);
            println!("HIBP check failed: {}", e);
        }
        None => {}
    }

    check_exit_code(&result, breach.as_ref())
}

async fn lookup_breach(password: &SecretString) -> Result<BreachStatus, String> {
    let url = config::get_hibp_url().map_err(|e| e.to_string())?;
    let client = HibpClient::new(url).map_err(|e| e.to_string())?;
    client.query(password).await.map_err(|e| e.to_string())
}

/// Exit code for `check`. A failed lookup outranks a breach, and a breach
/// outranks weakness feedback.
fn check_exit_code(result: &StrengthResult, breach: Option<&Result<BreachStatus, String>>) -> u8 {
    match breach {
        Some(Err(_)) => EXIT_LOOKUP_FAILED,
        Some(Ok(status)) if status.found => EXIT_BREACHED,
        _ if !result.feedback.is_empty() => EXIT_WEAK,
        _ => EXIT_OK,
    }
}

async fn cmd_generate(args: GenerateArgs) -> u8 {
    if !RECOMMENDED_LENGTH.contains(&args.length) {
        eprintln!("Warning: recommended length is 16-24 characters.");
    }

    let policy = GenerationPolicy {
        length: args.length,
        require_lower: !args.no_lower,
        require_upper: !args.no_upper,
        require_digit: !args.no_digits,
        require_symbol: !args.no_symbols,
        allow_symbols: !args.no_symbols,
        ..GenerationPolicy::default()
    };

    let password = match generate_password(&policy) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            return EXIT_POLICY;
        }
    };

    if args.show {
        println!("{}", password.expose_secret());
    } else {
        println!("Generated a password (hidden). Use --show to display.");
    }

    if args.slack {
        let message = SecretString::new(format!("`{}`", password.expose_secret()).into());
        if let Err(e) = send_to_slack(&message, args.channel.as_deref()).await {
            eprintln!("Failed to send to Slack: {}", e);
            return EXIT_SEND_FAILED;
        }
        println!("Sent to Slack successfully.");
    }

    EXIT_OK
}

async fn cmd_slack(args: SlackArgs) -> u8 {
    let Some(message) = args.message.filter(|m| !m.is_empty()) else {
        eprintln!("No message provided.");
        return EXIT_EMPTY_MESSAGE;
    };
    let message = SecretString::new(message.into());

    match send_to_slack(&message, args.channel.as_deref()).await {
        Ok(()) => {
            println!("Sent.");
            EXIT_OK
        }
        Err(e) => {
            eprintln!("Failed to send to Slack: {}", e);
            EXIT_SLACK_FAILED
        }
    }
}

async fn send_to_slack(message: &SecretString, channel: Option<&str>) -> Result<(), String> {
    let sender = SlackSender::from_env().map_err(|e| e.to_string())?;
    sender.send(message, channel).await.map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strong() -> StrengthResult {
        StrengthResult {
            ok: true,
            score: 5,
            feedback: Vec::new(),
        }
    }

    fn weak() -> StrengthResult {
        StrengthResult {
            ok: false,
            score: 1,
            feedback: vec!["Too short (min 12).".to_string()],
        }
    }

    fn found(count: u64) -> Result<BreachStatus, String> {
        Ok(BreachStatus { found: true, count })
    }

    #[test]
    fn test_clean_password_exits_ok() {
        assert_eq!(check_exit_code(&strong(), None), EXIT_OK);
        let clean = Ok(BreachStatus::NOT_FOUND);
        assert_eq!(check_exit_code(&strong(), Some(&clean)), EXIT_OK);
    }

    #[test]
    fn test_weak_password_exits_weak() {
        assert_eq!(check_exit_code(&weak(), None), EXIT_WEAK);
        let clean = Ok(BreachStatus::NOT_FOUND);
        assert_eq!(check_exit_code(&weak(), Some(&clean)), EXIT_WEAK);
    }

    #[test]
    fn test_feedback_alone_exits_weak() {
        // a high score does not hide a complaint
        let result = StrengthResult {
            ok: false,
            score: 4,
            feedback: vec!["Low variety of characters.".to_string()],
        };
        assert_eq!(check_exit_code(&result, None), EXIT_WEAK);
    }

    #[test]
    fn test_breach_outranks_weakness() {
        assert_eq!(check_exit_code(&strong(), Some(&found(3))), EXIT_BREACHED);
        assert_eq!(check_exit_code(&weak(), Some(&found(9545824))), EXIT_BREACHED);
    }

    #[test]
    fn test_lookup_failure_outranks_everything() {
        let failed = Err("HTTP status 503".to_string());
        assert_eq!(check_exit_code(&strong(), Some(&failed)), EXIT_LOOKUP_FAILED);
        assert_eq!(check_exit_code(&weak(), Some(&failed)), EXIT_LOOKUP_FAILED);
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [EXIT_OK, EXIT_WEAK, EXIT_BREACHED, EXIT_LOOKUP_FAILED, EXIT_SEND_FAILED];
        for (i, a) in codes.iter().enumerate() {
            assert!(codes[i + 1..].iter().all(|b| a != b));
        }
        assert!(![EXIT_POLICY, EXIT_INPUT].iter().any(|c| codes.contains(c)));
    }
}
