//! Serial Registration Domain
//!
//! Classifies inbound text into commands, runs the lookup/register/delete
//! decision against the database, and produces the reply text.

pub mod classify;
pub mod engine;
pub mod queries;
pub mod types;

pub use classify::classify_event;
pub use engine::handle_command;
pub use types::{Command, SerialRecord};
