//! Registration conversation
//!
//! `AwaitingContact → AwaitingWish → Done`, where `Done` accepts wish
//! updates and `begin` sends anyone back to `AwaitingContact`. States are
//! kept in the registry next to the records.

use super::participant::{ConversationState, ParticipantRecord, Sender};
use super::phone::parse_phone;
use crate::core::error::{AppError, AppResult};
use crate::storage::Registry;

/// Inbound conversational event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `/start`
    Begin,
    /// Contact shared through the keyboard button
    SharedContact { name: String, phone: String },
    /// Any non-command text
    Text(String),
}

/// What to answer the sender with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// Welcome text with the contact-request keyboard
    ContactPrompt,
    /// Text was not a phone number, ask again
    InvalidContact,
    /// Contact stored, ask for the wish
    AskWish,
    /// Contact changed after registration was complete
    ContactUpdated,
    /// First wish stored, registration complete
    Registered,
    /// Wish replaced
    WishUpdated,
    /// The sender's record is gone (removed by the administrator)
    NotRegistered,
}

/// Result of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub reply: Reply,
    /// The record this event created, if it created one
    pub created: Option<ParticipantRecord>,
}

impl Outcome {
    fn reply(reply: Reply) -> Self {
        Self { reply, created: None }
    }
}

/// Applies `event` from `sender` to the registry.
///
/// # Errors
/// Only storage failures; unknown participants become `Reply::NotRegistered`.
pub fn handle(registry: &mut Registry, sender: &Sender, event: Event) -> AppResult<Outcome> {
    let state = registry.state(sender.id);
    log::debug!("Conversation event {:?} from {} in state {}", event, sender.id, state);

    match event {
        Event::Begin => {
            registry.set_state(sender.id, ConversationState::AwaitingContact);
            Ok(Outcome::reply(Reply::ContactPrompt))
        }
        Event::SharedContact { name, phone } => {
            let name = if name.trim().is_empty() { sender.full_name.clone() } else { name };
            submit_contact(registry, sender, state, &name, &phone)
        }
        Event::Text(text) => match state {
            ConversationState::AwaitingContact => match parse_phone(&text) {
                Some(phone) => submit_contact(registry, sender, state, &sender.full_name, &phone),
                None => Ok(Outcome::reply(Reply::InvalidContact)),
            },
            ConversationState::AwaitingWish => submit_wish(registry, sender, &text, Reply::Registered),
            ConversationState::Done => submit_wish(registry, sender, &text, Reply::WishUpdated),
        },
    }
}

fn submit_contact(
    registry: &mut Registry,
    sender: &Sender,
    state: ConversationState,
    name: &str,
    phone: &str,
) -> AppResult<Outcome> {
    let created = registry.upsert_contact(sender.id, name.trim(), &sender.handle(), phone.trim())?;

    let reply = match state {
        ConversationState::AwaitingContact => {
            registry.set_state(sender.id, ConversationState::AwaitingWish);
            Reply::AskWish
        }
        ConversationState::AwaitingWish => Reply::AskWish,
        ConversationState::Done => Reply::ContactUpdated,
    };

    let created = if created {
        log::info!("New participant {} ({})", sender.id, name);
        registry.get(sender.id).cloned()
    } else {
        None
    };
    Ok(Outcome { reply, created })
}

fn submit_wish(registry: &mut Registry, sender: &Sender, text: &str, done: Reply) -> AppResult<Outcome> {
    let wish = text.trim();
    if wish.is_empty() {
        return Ok(Outcome::reply(Reply::AskWish));
    }

    match registry.upsert_wish(sender.id, wish) {
        Ok(()) => {
            registry.set_state(sender.id, ConversationState::Done);
            Ok(Outcome::reply(done))
        }
        Err(AppError::NotFound(id)) => {
            log::info!("Wish from {} ignored: not registered", id);
            Ok(Outcome::reply(Reply::NotRegistered))
        }
        Err(e) => Err(e),
    }
}
