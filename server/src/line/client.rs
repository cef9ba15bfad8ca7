//! LINE Reply API Client
//!
//! Sends exactly one text message per reply token through
//! `POST /v2/bot/message/reply`. Reply tokens are single-use and expire
//! shortly after the event is delivered; a failed reply is logged by the
//! caller and never retried (the webhook has already been acknowledged).

use std::time::Duration;

use serde_json::json;
use thiserror::Error;

/// Default LINE Messaging API endpoint.
const REPLY_ENDPOINT: &str = "https://api.line.me/v2/bot/message/reply";

/// Reply dispatch errors.
#[derive(Error, Debug)]
pub enum LineError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Reply API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
}

/// Client for the LINE reply API.
#[derive(Clone)]
pub struct LineClient {
    http: reqwest::Client,
    channel_access_token: String,
    endpoint: String,
}

impl std::fmt::Debug for LineClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineClient")
            .field("channel_access_token", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl LineClient {
    /// Create a client for the production reply endpoint.
    pub fn new(channel_access_token: impl Into<String>) -> Result<Self, LineError> {
        Self::with_endpoint(channel_access_token, REPLY_ENDPOINT)
    }

    /// Create a client against a custom endpoint (used by tests).
    pub fn with_endpoint(
        channel_access_token: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Result<Self, LineError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            channel_access_token: channel_access_token.into(),
            endpoint: endpoint.into(),
        })
    }

    /// Send one text message addressed by a reply token.
    pub async fn reply_text(&self, reply_token: &str, text: &str) -> Result<(), LineError> {
        let body = json!({
            "replyToken": reply_token,
            "messages": [{ "type": "text", "text": text }],
        });

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.channel_access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // Consumed or expired reply tokens surface here as HTTP 400.
        let body = response.text().await.unwrap_or_default();
        Err(LineError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_token() {
        let client = LineClient::new("secret-token").unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn reply_to_unreachable_endpoint_is_transport_error() {
        // Port 9 (discard) on localhost is not listening.
        let client = LineClient::with_endpoint("tok", "http://127.0.0.1:9/reply").unwrap();
        let err = client.reply_text("token", "hello").await.unwrap_err();
        assert!(matches!(err, LineError::Transport(_)));
    }
}
