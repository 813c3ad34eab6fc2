//! Password generation and strength evaluation library
//!
//! This library provides a policy-constrained secure password generator,
//! a deterministic strength evaluator and, behind features, a k-anonymity
//! breach lookup and a Slack sender.
//!
//! # Features
//!
//! - `async` (default): Enables channel-based evaluation with cancellation support
//! - `tracing`: Enables logging via tracing crate (never logs secrets)
//! - `breach`: Pwned Passwords range lookup (`HibpClient`)
//! - `notify`: Slack delivery (`SlackSender`)
//! - `cli`: Builds the `securepass` binary
//!
//! # Environment Variables
//!
//! See [`config`]. The generator and evaluator read no environment at all.
//!
//! # Example
//!
//! ```rust
//! use securepass::{GenerationPolicy, StrengthPolicy, evaluate_strength, generate_password};
//!
//! let password = generate_password(&GenerationPolicy::default()).expect("valid policy");
//! assert_eq!(password.len(), 20);
//!
//! let evaluation = evaluate_strength(&password, &StrengthPolicy::default());
//! println!("Score: {}", evaluation.score);
//! println!("Feedback: {:?}", evaluation.feedback);
//! ```

// Internal modules
mod classes;
mod denylist;
mod error;
mod evaluator;
mod generator;
mod random;
mod sections;

pub mod config;

#[cfg(feature = "breach")]
mod breach;

#[cfg(feature = "notify")]
mod notify;

#[cfg(all(test, any(feature = "breach", feature = "notify")))]
mod test_support;

// Public API
pub use classes::{CharClass, CharacterClasses, DEFAULT_SYMBOLS};
pub use denylist::{COMMON_PATTERNS, contains_common_pattern};
pub use error::{ConfigurationError, PolicyError, SendError, TransportError};
pub use evaluator::{
    DEFAULT_MIN_LENGTH, MAX_SCORE, PASSING_SCORE, StrengthPolicy, StrengthResult,
    evaluate_strength,
};
pub use generator::{
    DEFAULT_GENERATED_LENGTH, GeneratedPassword, GenerationPolicy, MIN_GENERATED_LENGTH,
    generate, generate_password, secure_shuffle,
};
pub use random::{CryptoRandom, OsRandom, SecureRandomSource};

#[cfg(feature = "async")]
pub use evaluator::evaluate_strength_tx;

#[cfg(feature = "breach")]
pub use breach::{BreachLookup, BreachStatus, HibpClient, parse_range_response, sha1_hex};

#[cfg(feature = "notify")]
pub use notify::{MessageSender, SlackSender};

// Needed by callers that pass secrets in and read generated ones out
pub use secrecy::{ExposeSecret, SecretString};
