//! Webhook Handler
//!
//! `POST /callback` — verifies the delivery signature against the raw body,
//! acknowledges with HTTP 200, and fans the delivery batch out to one task
//! per event. Database work and reply dispatch happen after the response is
//! sent; their failures are visible only in logs, which satisfies LINE's
//! delivery-acknowledgment timeout.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use tracing::{debug, error, instrument, warn};

use crate::line::events::{WebhookEnvelope, WebhookEvent};
use crate::line::signature;
use crate::serials;

use super::AppState;

/// Signature header sent with every LINE webhook delivery.
const SIGNATURE_HEADER: &str = "x-line-signature";

/// POST /callback
#[instrument(skip_all)]
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, (StatusCode, String)> {
    // Verify against the raw body; parsing it first would invalidate the MAC.
    let provided = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or((
            StatusCode::BAD_REQUEST,
            "Missing X-Line-Signature header".to_string(),
        ))?;

    if !signature::verify_signature(&state.config.channel_secret, &body, provided) {
        warn!("Webhook delivery rejected: signature mismatch");
        return Err((
            StatusCode::BAD_REQUEST,
            "Invalid X-Line-Signature".to_string(),
        ));
    }

    let envelope: WebhookEnvelope = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Webhook delivery rejected: malformed body");
        (StatusCode::BAD_REQUEST, "Malformed webhook body".to_string())
    })?;

    debug!(events = envelope.events.len(), "Webhook delivery accepted");

    // Unordered fan-out: events in one delivery are independent, and one
    // failing event must not abort its siblings. The tasks outlive this
    // handler; the 200 below is sent before any of them touch the database.
    for event in envelope.events {
        let state = state.clone();
        tokio::spawn(async move {
            handle_event(&state, event).await;
        });
    }

    Ok(StatusCode::OK)
}

/// Process a single event: classify, run the engine, dispatch the reply.
async fn handle_event(state: &AppState, event: WebhookEvent) {
    // Non-text and non-message events: no database calls, no reply.
    let Some((reply_token, command)) = serials::classify_event(&event) else {
        return;
    };

    let now = chrono::Utc::now();
    let reply = serials::handle_command(&state.db, &command, now).await;

    // Reply tokens are single-use; a consumed or expired token fails here.
    // Logged only — the webhook caller was answered long ago.
    if let Err(e) = state.line.reply_text(&reply_token, &reply).await {
        error!(
            serial_id = command.serial_id(),
            error = %e,
            "Failed to dispatch reply"
        );
    }
}
