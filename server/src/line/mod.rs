//! LINE Messaging Platform Adapter
//!
//! Webhook signature verification, event payload types, and the reply API
//! client.

pub mod client;
pub mod events;
pub mod signature;

pub use client::{LineClient, LineError};
