//! Error types shared across the crate.

use thiserror::Error;

/// A generation policy that cannot be honored as written.
///
/// Policies are never corrected on the caller's behalf: a contradictory
/// policy is reported, not reinterpreted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),
}

/// Failure talking to a remote collaborator (breach lookup, messaging).
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("Remote service returned status {0}")]
    Status(u16),
    #[error("Remote service rejected the request: {0}")]
    Rejected(String),
}

#[cfg(any(feature = "breach", feature = "notify"))]
impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        // without_url keeps webhook URLs (which embed credentials) out of messages
        TransportError::Http(e.without_url().to_string())
    }
}

/// Required configuration is absent from the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Missing configuration: set the {0} environment variable")]
    Missing(&'static str),
    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Outcome of a failed `MessageSender::send`.
#[derive(Error, Debug)]
pub enum SendError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}
