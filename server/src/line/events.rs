//! LINE Webhook Event Types
//!
//! Serde types for the webhook envelope delivered to `POST /callback`.
//! Fields are camelCase on the wire. Event and message types other than
//! text messages deserialize losslessly and are ignored downstream, so a
//! single delivery may mix events this bot cares about with ones it does not.

use serde::Deserialize;

/// Top-level webhook request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEnvelope {
    /// Bot user ID this delivery is addressed to.
    #[serde(default)]
    pub destination: Option<String>,
    /// Delivery batch; may be empty (LINE sends empty deliveries on verify).
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

/// A single webhook event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    /// Event type (`"message"`, `"follow"`, `"postback"`, ...).
    #[serde(rename = "type")]
    pub event_type: String,
    /// Single-use token addressing exactly one reply to this event.
    #[serde(default)]
    pub reply_token: Option<String>,
    /// Message content, present only for `"message"` events.
    #[serde(default)]
    pub message: Option<MessageContent>,
}

/// Message content of a `"message"` event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageContent {
    /// Message type (`"text"`, `"image"`, `"sticker"`, ...).
    #[serde(rename = "type")]
    pub message_type: String,
    /// Message ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Text body, present only for `"text"` messages.
    #[serde(default)]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_text_message_event() {
        let body = r#"{
            "destination": "U0123456789abcdef",
            "events": [{
                "type": "message",
                "replyToken": "reply-token-1",
                "message": { "type": "text", "id": "468789577898262530", "text": "ABC123" }
            }]
        }"#;

        let envelope: WebhookEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.events.len(), 1);

        let event = &envelope.events[0];
        assert_eq!(event.event_type, "message");
        assert_eq!(event.reply_token.as_deref(), Some("reply-token-1"));
        assert_eq!(
            event.message.as_ref().unwrap().text.as_deref(),
            Some("ABC123")
        );
    }

    #[test]
    fn parses_non_message_event() {
        let body = r#"{
            "events": [{ "type": "follow", "replyToken": "reply-token-2" }]
        }"#;

        let envelope: WebhookEnvelope = serde_json::from_str(body).unwrap();
        let event = &envelope.events[0];
        assert_eq!(event.event_type, "follow");
        assert!(event.message.is_none());
    }

    #[test]
    fn parses_empty_delivery() {
        let envelope: WebhookEnvelope = serde_json::from_str(r#"{"events":[]}"#).unwrap();
        assert!(envelope.events.is_empty());
        assert!(envelope.destination.is_none());
    }

    #[test]
    fn tolerates_unknown_fields() {
        // LINE adds fields (mode, timestamp, source, webhookEventId, ...) that
        // this bot does not consume.
        let body = r#"{
            "destination": "U1",
            "events": [{
                "type": "message",
                "mode": "active",
                "timestamp": 1625665242211,
                "source": { "type": "user", "userId": "U2" },
                "replyToken": "tok",
                "message": { "type": "sticker", "id": "1", "stickerId": "3" }
            }]
        }"#;

        let envelope: WebhookEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.events[0].message.as_ref().unwrap().message_type, "sticker");
    }
}
