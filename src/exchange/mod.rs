//! Gift exchange domain: participants, the registration conversation,
//! the draw and the administrator gate
//!
//! Nothing in here depends on teloxide; the Telegram layer turns updates
//! into [`Event`]s and [`AdminCommand`]s and renders [`Response`]s.

pub mod admin;
pub mod conversation;
pub mod notifier;
pub mod pairing;
pub mod participant;
pub mod phone;
pub mod service;

pub use admin::AdminGate;
pub use conversation::{Event, Reply};
pub use notifier::{DeliveryError, Notice, Notifier};
pub use pairing::{Assignment, DrawReport};
pub use participant::{ConversationState, ParticipantId, ParticipantRecord, Sender};
pub use service::{AdminCommand, Response, SecretSanta};
