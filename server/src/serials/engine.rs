//! Lookup/Register/Delete Engine
//!
//! Runs a classified command against the store and produces the single reply
//! string for it. Storage errors are absorbed here: the user gets a
//! descriptive error reply and the failure is logged, never propagated to
//! the webhook response (which has already been sent).

use chrono::{DateTime, FixedOffset, Utc};
use sqlx::PgPool;
use tracing::error;

use super::queries;
use super::types::Command;

/// Reply for a serial seen for the first time.
const REPLY_REGISTERED: &str = "謝謝你的訊息，我們已經收到！";

/// Reply for a delete command whose serial was never registered.
const REPLY_NOT_FOUND: &str = "查無該序號！";

/// Reply when a query, insert, or delete fails.
const REPLY_STORAGE_ERROR: &str = "系統發生錯誤，請稍後再試！";

/// The bot's audience is in UTC+8; timestamps are rendered in that offset.
const REPLY_UTC_OFFSET_HOURS: i32 = 8;

/// Execute a command and produce the reply text.
///
/// `now` is captured at request-handling time by the caller, not at the
/// moment the insert executes. Every branch performs one or two database
/// round trips and returns exactly one reply string.
pub async fn handle_command(pool: &PgPool, command: &Command, now: DateTime<Utc>) -> String {
    match command {
        Command::Register(serial_id) => register(pool, serial_id, now).await,
        Command::Delete(serial_id) => delete(pool, serial_id).await,
    }
}

/// Register an unseen serial, or report when it was first registered.
///
/// Two attempts: when the insert conflicts but the row is gone by the
/// follow-up lookup (a concurrent delete won in between), the insert is
/// retried once. A register command therefore only ever replies with the
/// acknowledgment, the already-registered timestamp, or the storage error.
async fn register(pool: &PgPool, serial_id: &str, now: DateTime<Utc>) -> String {
    for _ in 0..2 {
        match queries::insert_serial(pool, serial_id, now).await {
            Ok(true) => return REPLY_REGISTERED.to_string(),
            // Insert did not apply: the serial already exists (possibly
            // because a concurrent registration won the race). Report its
            // timestamp.
            Ok(false) => match queries::find_serial(pool, serial_id).await {
                Ok(Some(record)) => {
                    return format!("已在{}登錄", format_registered_at(record.registered_at));
                }
                // Row deleted between the conflicting insert and the lookup.
                Ok(None) => {}
                Err(e) => {
                    error!(serial_id, error = %e, "Serial lookup failed");
                    return REPLY_STORAGE_ERROR.to_string();
                }
            },
            Err(e) => {
                error!(serial_id, error = %e, "Serial insert failed");
                return REPLY_STORAGE_ERROR.to_string();
            }
        }
    }

    // Both attempts lost both races; give up rather than loop unbounded.
    error!(serial_id, "Serial registration retries exhausted");
    REPLY_STORAGE_ERROR.to_string()
}

/// Delete a serial's record if one exists.
async fn delete(pool: &PgPool, serial_id: &str) -> String {
    match queries::delete_serial(pool, serial_id).await {
        Ok(true) => format!("{serial_id}已刪除成功"),
        Ok(false) => REPLY_NOT_FOUND.to_string(),
        Err(e) => {
            error!(serial_id, error = %e, "Serial delete failed");
            REPLY_STORAGE_ERROR.to_string()
        }
    }
}

/// Render a registration timestamp for the reply, in the audience timezone.
fn format_registered_at(registered_at: DateTime<Utc>) -> String {
    let offset = FixedOffset::east_opt(REPLY_UTC_OFFSET_HOURS * 3600)
        .expect("constant offset is in range");
    registered_at
        .with_timezone(&offset)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
