//! Telegram bot handler tree configuration
//!
//! This module provides the main dispatcher schema for the Telegram bot.
//! Endpoints only translate updates into exchange events and render the
//! responses; all decisions live in [`crate::exchange`].

mod commands;
mod schema;
mod types;

pub use schema::schema;
pub use types::{sender_from_message, sender_from_user, HandlerDeps, HandlerError};
