//! Participant identity, record and conversation state

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identity of a registrant (Telegram user id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub u64);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ParticipantId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(ParticipantId)
    }
}

/// What the registry keeps per participant.
///
/// Serialized as one value of the participants snapshot; `handle` and `wish`
/// are left out of the JSON while empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub handle: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub wish: String,
}

impl ParticipantRecord {
    /// Contact recorded.
    pub fn is_contact_complete(&self) -> bool {
        !self.phone.trim().is_empty()
    }

    /// Phone and wish both recorded, may take part in the draw.
    pub fn is_eligible(&self) -> bool {
        self.is_contact_complete() && !self.wish.trim().is_empty()
    }
}

/// Where a user is in the registration conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConversationState {
    #[default]
    AwaitingContact,
    AwaitingWish,
    Done,
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConversationState::AwaitingContact => "AWAITING_CONTACT",
            ConversationState::AwaitingWish => "AWAITING_WISH",
            ConversationState::Done => "DONE",
        };
        f.write_str(name)
    }
}

/// Who sent an inbound event, as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: ParticipantId,
    pub full_name: String,
    /// Public alias without the leading '@', if the user has one
    pub username: Option<String>,
}

impl Sender {
    pub fn new(id: u64, full_name: impl Into<String>, username: Option<&str>) -> Self {
        Self {
            id: ParticipantId(id),
            full_name: full_name.into(),
            username: username.map(|u| u.trim_start_matches('@').to_string()),
        }
    }

    /// Handle in "@username" form, empty when the user has no alias.
    pub fn handle(&self) -> String {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .map(|u| format!("@{}", u))
            .unwrap_or_default()
    }
}
