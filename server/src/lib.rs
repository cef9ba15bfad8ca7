//! Serial Registry Server
//!
//! LINE webhook bot that records user-supplied serial numbers in a relational
//! table and answers whether a serial is new, already registered, or deleted.

pub mod config;
pub mod db;
pub mod line;
pub mod serials;
pub mod webhook;
