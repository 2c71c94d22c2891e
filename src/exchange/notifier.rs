//! Outbound notifications
//!
//! The exchange module has no teloxide dependency: notifications are plain
//! values handed to a [`Notifier`], and the Telegram layer decides how they
//! are rendered and sent.

use async_trait::async_trait;
use thiserror::Error;

use super::participant::ParticipantId;

/// A message the bot sends on its own initiative (not a reply).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Tells a giver whom they gift and what that person wishes for
    Assignment { receiver_name: String, receiver_wish: String },
    /// Tells the administrator about a new registration
    NewParticipant {
        id: ParticipantId,
        name: String,
        handle: String,
    },
}

/// One notification that could not be delivered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Failed to deliver notification to {target}: {reason}")]
pub struct DeliveryError {
    pub target: ParticipantId,
    pub reason: String,
}

impl DeliveryError {
    pub fn new(target: ParticipantId, reason: impl ToString) -> Self {
        Self {
            target,
            reason: reason.to_string(),
        }
    }
}

/// Sends notices to participants.
///
/// Implementations report failures as values; callers decide whether to go on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, to: ParticipantId, notice: &Notice) -> Result<(), DeliveryError>;
}
