//! santabot - Telegram bot for a Secret Santa gift exchange
//!
//! Participants register with a contact and a gift wish; the administrator
//! runs a draw that tells every participant whom they gift.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging
//! - `storage`: participant registry and its snapshot backings
//! - `exchange`: conversation, pairing and administrator gate (no Telegram types)
//! - `telegram`: bot setup, dispatcher schema, rendering and delivery
//! - `testing`: recording notifier used by tests

pub mod cli;
pub mod core;
pub mod exchange;
pub mod storage;
pub mod telegram;
pub mod testing;

// Re-export commonly used types for convenience
pub use core::{config, AppError, AppResult};
pub use exchange::{SecretSanta, Sender};
pub use storage::{Registry, SharedRegistry};
