//! Slack delivery for generated secrets.
//!
//! Without a destination the message goes to the incoming webhook from
//! `SLACK_WEBHOOK_URL`. With a destination channel it is posted through
//! `chat.postMessage` using `SLACK_BOT_TOKEN`. Message text is never logged.

use std::future::Future;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::{self, SLACK_BOT_TOKEN_VAR, SLACK_WEBHOOK_VAR};
use crate::error::{ConfigurationError, SendError, TransportError};

pub const SLACK_POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Relays a message to a human.
pub trait MessageSender {
    fn send(
        &self,
        text: &SecretString,
        destination: Option<&str>,
    ) -> impl Future<Output = Result<(), SendError>> + Send;
}

#[derive(Deserialize)]
struct SlackApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

pub struct SlackSender {
    client: reqwest::Client,
    webhook_url: Option<SecretString>,
    bot_token: Option<SecretString>,
    api_url: String,
}

impl SlackSender {
    pub fn new(
        webhook_url: Option<SecretString>,
        bot_token: Option<SecretString>,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self {
            client,
            webhook_url,
            bot_token,
            api_url: SLACK_POST_MESSAGE_URL.to_string(),
        })
    }

    /// Reads `SLACK_WEBHOOK_URL` and `SLACK_BOT_TOKEN`. Either may be absent;
    /// the missing one is only reported when a send needs it.
    pub fn from_env() -> Result<Self, TransportError> {
        Self::new(config::get_slack_webhook(), config::get_slack_bot_token())
    }

    /// Overrides the `chat.postMessage` endpoint.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    async fn send_webhook(&self, text: &SecretString) -> Result<(), SendError> {
        let url = self
            .webhook_url
            .as_ref()
            .ok_or(ConfigurationError::Missing(SLACK_WEBHOOK_VAR))?;

        let payload = serde_json::json!({ "text": text.expose_secret() });
        let response = self
            .client
            .post(url.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(TransportError::from)?;

        let status = response.status();
        if !status.is_success() {
            #[cfg(feature = "tracing")]
            tracing::warn!(status = status.as_u16(), "Slack webhook rejected message");
            return Err(TransportError::Status(status.as_u16()).into());
        }
        Ok(())
    }

    async fn send_bot(&self, text: &SecretString, channel: &str) -> Result<(), SendError> {
        let token = self
            .bot_token
            .as_ref()
            .ok_or(ConfigurationError::Missing(SLACK_BOT_TOKEN_VAR))?;

        let payload = serde_json::json!({
            "channel": channel,
            "text": text.expose_secret(),
            "parse": "full",
        });
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(token.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(TransportError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()).into());
        }

        let reply: SlackApiResponse = response.json().await.map_err(TransportError::from)?;
        if !reply.ok {
            let reason = reply.error.unwrap_or_else(|| "unknown error".to_string());
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %reason, "Slack API returned ok=false");
            return Err(TransportError::Rejected(reason).into());
        }
        Ok(())
    }
}

impl MessageSender for SlackSender {
    async fn send(&self, text: &SecretString, destination: Option<&str>) -> Result<(), SendError> {
        match destination {
            Some(channel) => self.send_bot(text, channel).await?,
            None => self.send_webhook(text).await?,
        }

        #[cfg(feature = "tracing")]
        {
            let via = if destination.is_some() { "bot" } else { "webhook" };
            tracing::info!(via, "message sent to Slack");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[tokio::test]
    async fn test_webhook_missing() {
        let sender = SlackSender::new(None, None).unwrap();
        let result = sender.send(&secret("hello"), None).await;
        assert!(matches!(
            result,
            Err(SendError::Configuration(ConfigurationError::Missing("SLACK_WEBHOOK_URL")))
        ));
    }

    #[tokio::test]
    async fn test_bot_token_missing() {
        let sender = SlackSender::new(Some(secret("http://127.0.0.1:1/hook")), None).unwrap();
        let result = sender.send(&secret("hello"), Some("C123")).await;
        assert!(matches!(
            result,
            Err(SendError::Configuration(ConfigurationError::Missing("SLACK_BOT_TOKEN")))
        ));
    }

    #[tokio::test]
    async fn test_webhook_posts_text() {
        let (base, request) = serve_once(200, "text/plain", "ok").await;
        let webhook = secret(&format!("{}/services/T/B/X", base));
        let sender = SlackSender::new(Some(webhook), None).unwrap();

        sender.send(&secret("`s3cr3t`"), None).await.unwrap();

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /services/T/B/X HTTP/1.1"));
        assert!(raw.contains(r#"{"text":"`s3cr3t`"}"#));
    }

    #[tokio::test]
    async fn test_webhook_error_status() {
        let (base, _request) = serve_once(404, "text/plain", "no_service").await;
        let sender = SlackSender::new(Some(secret(&format!("{}/hook", base))), None).unwrap();

        let result = sender.send(&secret("hi"), None).await;
        assert!(matches!(result, Err(SendError::Transport(TransportError::Status(404)))));
    }

    #[tokio::test]
    async fn test_bot_posts_with_bearer() {
        let (base, request) = serve_once(200, "application/json", r#"{"ok":true}"#).await;
        let sender = SlackSender::new(None, Some(secret("xoxb-abc")))
            .unwrap()
            .with_api_url(format!("{}/api/chat.postMessage", base));

        sender.send(&secret("hi"), Some("C42")).await.unwrap();

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /api/chat.postMessage HTTP/1.1"));
        assert!(raw.to_lowercase().contains("authorization: bearer xoxb-abc"));
        assert!(raw.contains(r#""channel":"C42""#));
        assert!(raw.contains(r#""parse":"full""#));
    }

    #[tokio::test]
    async fn test_bot_api_rejection() {
        let body = r#"{"ok":false,"error":"channel_not_found"}"#;
        let (base, _request) = serve_once(200, "application/json", body).await;
        let sender = SlackSender::new(None, Some(secret("xoxb-abc")))
            .unwrap()
            .with_api_url(format!("{}/api/chat.postMessage", base));

        let result = sender.send(&secret("hi"), Some("C404")).await;
        match result {
            Err(SendError::Transport(TransportError::Rejected(reason))) => {
                assert_eq!(reason, "channel_not_found");
            }
            other => panic!("Expected Rejected error, got {:?}", other),
        }
    }
}
