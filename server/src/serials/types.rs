//! Serial Registry Types

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One registered serial number.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SerialRecord {
    #[sqlx(rename = "serialID")]
    pub serial_id: String,
    #[sqlx(rename = "Time")]
    pub registered_at: DateTime<Utc>,
}

/// A classified command extracted from an inbound text message.
///
/// The payload is the user-supplied identifier. Any string is accepted,
/// including the empty string; the registry does not validate content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Look the serial up and register it if unseen.
    Register(String),
    /// Delete the serial's record if one exists.
    Delete(String),
}

impl Command {
    /// The identifier the command operates on.
    #[must_use]
    pub fn serial_id(&self) -> &str {
        match self {
            Self::Register(id) | Self::Delete(id) => id,
        }
    }
}