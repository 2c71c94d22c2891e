//! Handler types, dependencies, and sender extraction

use std::sync::Arc;

use teloxide::types::{Message, User};

use crate::exchange::{SecretSanta, Sender};

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub santa: Arc<SecretSanta>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(santa: Arc<SecretSanta>) -> Self {
        Self { santa }
    }
}

/// Builds the exchange-side sender from a Telegram user.
pub fn sender_from_user(user: &User) -> Sender {
    Sender::new(user.id.0, user.full_name(), user.username.as_deref())
}

/// Sender of a message, `None` for channel posts and other anonymous messages.
pub fn sender_from_message(msg: &Message) -> Option<Sender> {
    msg.from.as_ref().map(sender_from_user)
}
