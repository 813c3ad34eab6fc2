//! Breach lookup using the Pwned Passwords k-anonymity range API.
//!
//! Only the first five hex characters of the password's SHA-1 digest leave
//! the process. The service answers with every known suffix sharing that
//! prefix and the match happens locally.

use std::future::Future;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sha1::{Digest, Sha1};

use crate::config::DEFAULT_HIBP_URL;
use crate::error::TransportError;

pub const PREFIX_LEN: usize = 5;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Whether a password appears in the breach corpus, and how often.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreachStatus {
    pub found: bool,
    pub count: u64,
}

impl BreachStatus {
    pub const NOT_FOUND: BreachStatus = BreachStatus {
        found: false,
        count: 0,
    };
}

/// A breach corpus that can be queried without revealing the password.
pub trait BreachLookup {
    fn query(
        &self,
        password: &SecretString,
    ) -> impl Future<Output = Result<BreachStatus, TransportError>> + Send;
}

/// Uppercase hex SHA-1 of the UTF-8 password.
pub fn sha1_hex(password: &str) -> String {
    hex::encode_upper(Sha1::digest(password.as_bytes()))
}

/// Splits a 40 character digest into the wire prefix and the local suffix.
pub fn split_digest(digest: &str) -> (&str, &str) {
    digest.split_at(PREFIX_LEN)
}

/// Finds `suffix` in a range response body of `SUFFIX:COUNT` lines.
///
/// Malformed lines are skipped. An unparsable count is reported as 1.
/// Padding entries (count 0) are not matches.
pub fn parse_range_response(body: &str, suffix: &str) -> BreachStatus {
    for line in body.lines() {
        let parts: Vec<&str> = line.split(':').collect();
        if parts.len() != 2 {
            continue;
        }
        if !parts[0].trim().eq_ignore_ascii_case(suffix) {
            continue;
        }
        let count = parts[1].trim().parse::<u64>().unwrap_or(1);
        if count == 0 {
            return BreachStatus::NOT_FOUND;
        }
        return BreachStatus { found: true, count };
    }
    BreachStatus::NOT_FOUND
}

/// Client for `https://api.pwnedpasswords.com/range/{prefix}`.
#[derive(Debug, Clone)]
pub struct HibpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HibpClient {
    /// `base_url` must end with `/`; see [`crate::config::get_hibp_url`].
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("securepass/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn default_endpoint() -> Result<Self, TransportError> {
        Self::new(DEFAULT_HIBP_URL)
    }
}

impl BreachLookup for HibpClient {
    async fn query(&self, password: &SecretString) -> Result<BreachStatus, TransportError> {
        let digest = sha1_hex(password.expose_secret());
        let (prefix, suffix) = split_digest(&digest);
        let url = format!("{}{}", self.base_url, prefix);

        #[cfg(feature = "tracing")]
        tracing::debug!(prefix_len = prefix.len(), "querying breach range");

        let response = self
            .client
            .get(&url)
            .header("Add-Padding", "true")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            #[cfg(feature = "tracing")]
            tracing::warn!(status = status.as_u16(), "breach range request failed");
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(parse_range_response(&body, suffix))
    }
}


#[cfg(test)]
mod client_tests {
    use super::*;
    use crate::test_support::serve_once;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[tokio::test]
    async fn test_query_sends_only_prefix() {
        let (base, request) = serve_once(
            200,
            "text/plain",
            "1E4C9B93F3F0682250B6CF8331B7EE68FD8:42\r\nFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF:0",
        )
        .await;
        let client = HibpClient::new(format!("{}/range/", base)).unwrap();

        let status = client.query(&secret("password")).await.unwrap();
        assert_eq!(status, BreachStatus { found: true, count: 42 });

        let raw = request.await.unwrap();
        assert!(raw.starts_with("GET /range/5BAA6 HTTP/1.1"));
        assert!(!raw.contains("1E4C9B93"));
        assert!(!raw.contains("password"));
        assert!(raw.to_lowercase().contains("add-padding: true"));
        assert!(raw.contains("securepass/"));
    }

    #[tokio::test]
    async fn test_query_not_found() {
        let (base, _request) =
            serve_once(200, "text/plain", "0018A45C4D1DEF81644B54AB7F969B88D65:1").await;
        let client = HibpClient::new(format!("{}/range/", base)).unwrap();

        let status = client.query(&secret("password")).await.unwrap();
        assert_eq!(status, BreachStatus::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_query_error_status() {
        let (base, _request) = serve_once(503, "text/plain", "unavailable").await;
        let client = HibpClient::new(format!("{}/range/", base)).unwrap();

        let result = client.query(&secret("password")).await;
        assert!(matches!(result, Err(TransportError::Status(503))));
    }

    #[tokio::test]
    async fn test_query_connection_refused() {
        // bind then drop to get a port with nothing listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HibpClient::new(format!("http://{}/range/", addr)).unwrap();
        let result = client.query(&secret("password")).await;
        assert!(matches!(result, Err(TransportError::Http(_))));
    }
}
