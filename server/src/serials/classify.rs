//! Event Classifier
//!
//! Filters webhook events down to text messages and splits them into
//! delete commands (leading `d`, case-insensitive) and register commands.

use crate::line::events::WebhookEvent;

use super::types::Command;

/// Classify a webhook event into a command, if it is one this bot handles.
///
/// Returns `None` for anything that is not a text message (follow events,
/// stickers, images, ...); such events produce no database calls and no
/// reply. The reply token is returned alongside the command so the caller
/// can address the response.
#[must_use]
pub fn classify_event(event: &WebhookEvent) -> Option<(String, Command)> {
    if event.event_type != "message" {
        return None;
    }

    let message = event.message.as_ref()?;
    if message.message_type != "text" {
        return None;
    }

    let reply_token = event.reply_token.clone()?;
    let text = message.text.as_deref().unwrap_or_default().trim();

    Some((reply_token, classify_text(text)))
}

/// Classify trimmed text into a command.
///
/// A leading `d` or `D` marks a delete command; the remainder of the text is
/// the identifier. Everything else is a register command with the full text
/// as the identifier. No payload validation beyond trimming.
#[must_use]
pub fn classify_text(text: &str) -> Command {
    match text.chars().next() {
        Some(first) if first.eq_ignore_ascii_case(&'d') => {
            Command::Delete(text[first.len_utf8()..].to_string())
        }
        _ => Command::Register(text.to_string()),
    }
}
