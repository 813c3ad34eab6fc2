//! Environment configuration for the network collaborators.
//!
//! # Environment Variables
//!
//! - `SECUREPASS_HIBP_URL`: range endpoint prefix for breach lookups
//!   (default: `https://api.pwnedpasswords.com/range/`)
//! - `SLACK_WEBHOOK_URL`: incoming webhook used when no channel is given
//! - `SLACK_BOT_TOKEN`: bot token used for `chat.postMessage`
//!
//! Credentials are read into `SecretString` and never logged.

use secrecy::SecretString;

use crate::error::ConfigurationError;

pub const HIBP_URL_VAR: &str = "SECUREPASS_HIBP_URL";
pub const SLACK_WEBHOOK_VAR: &str = "SLACK_WEBHOOK_URL";
pub const SLACK_BOT_TOKEN_VAR: &str = "SLACK_BOT_TOKEN";

pub const DEFAULT_HIBP_URL: &str = "https://api.pwnedpasswords.com/range/";

/// Returns the breach lookup endpoint.
///
/// Priority:
/// 1. Environment variable `SECUREPASS_HIBP_URL`
/// 2. Default `https://api.pwnedpasswords.com/range/`
///
/// A trailing `/` is appended if missing so the hash prefix can be joined directly.
pub fn get_hibp_url() -> Result<String, ConfigurationError> {
    let url = std::env::var(HIBP_URL_VAR)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_HIBP_URL.to_string());

    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(ConfigurationError::Invalid {
            var: HIBP_URL_VAR,
            reason: "must be an http(s) URL".to_string(),
        });
    }

    if url.ends_with('/') {
        Ok(url)
    } else {
        Ok(format!("{}/", url))
    }
}

/// Returns the Slack webhook URL, if configured.
pub fn get_slack_webhook() -> Option<SecretString> {
    read_secret(SLACK_WEBHOOK_VAR)
}

/// Returns the Slack bot token, if configured.
pub fn get_slack_bot_token() -> Option<SecretString> {
    read_secret(SLACK_BOT_TOKEN_VAR)
}

/// Like the optional getters, but missing values are an error.
pub fn require(var: &'static str) -> Result<SecretString, ConfigurationError> {
    read_secret(var).ok_or(ConfigurationError::Missing(var))
}

fn read_secret(var: &str) -> Option<SecretString> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(|v| SecretString::new(v.into()))
}
