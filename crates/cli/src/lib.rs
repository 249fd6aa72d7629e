//! Terminal helpers for the Event Manager CLI
//!
//! Provides shared CLI functionality:
//! - Status messages and date/time formatting
//! - Spinners for requests in flight
//! - Aligned tables for events, registrations and reminders

#![warn(missing_docs)]

pub mod output;
pub mod progress;
pub mod table;
