//! Participant registry
//!
//! Owns every participant record and every conversation state. Records are
//! written through to the configured [`ParticipantStore`] before a mutating
//! call returns; conversation states live only in memory and are rebuilt
//! from the records when the registry is opened.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::store::{MemoryStore, ParticipantStore, Snapshot};
use crate::core::error::{AppError, AppResult};
use crate::exchange::participant::{ConversationState, ParticipantId, ParticipantRecord};

/// Registry shared between handlers. One lock covers records, states and the
/// draw snapshot.
pub type SharedRegistry = Arc<Mutex<Registry>>;

pub struct Registry {
    records: Snapshot,
    states: HashMap<ParticipantId, ConversationState>,
    store: Box<dyn ParticipantStore>,
}

impl Registry {
    /// Loads the snapshot from `store` and rebuilds conversation states:
    /// a record with a wish is `Done`, a record without one is `AwaitingWish`.
    pub fn open(store: Box<dyn ParticipantStore>) -> AppResult<Self> {
        let records = store.load()?;
        let states = records
            .iter()
            .map(|(id, record)| {
                let state = if record.wish.trim().is_empty() {
                    ConversationState::AwaitingWish
                } else {
                    ConversationState::Done
                };
                (*id, state)
            })
            .collect();

        log::info!("Registry opened from {} with {} participants", store.describe(), records.len());

        Ok(Self { records, states, store })
    }

    /// Registry that never persists.
    pub fn in_memory() -> Self {
        Self {
            records: Snapshot::new(),
            states: HashMap::new(),
            store: Box::new(MemoryStore),
        }
    }

    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(Mutex::new(self))
    }

    /// Conversation state, `AwaitingContact` when nothing is on file.
    pub fn state(&self, id: ParticipantId) -> ConversationState {
        self.states.get(&id).copied().unwrap_or_default()
    }

    pub fn set_state(&mut self, id: ParticipantId, state: ConversationState) {
        self.states.insert(id, state);
    }

    /// Creates the record if absent, otherwise updates name, handle and phone.
    ///
    /// Returns `true` when a new record was created.
    pub fn upsert_contact(&mut self, id: ParticipantId, name: &str, handle: &str, phone: &str) -> AppResult<bool> {
        let created = !self.records.contains_key(&id);
        let mut next = self.records.clone();
        let record = next.entry(id).or_default();
        record.name = name.to_string();
        record.handle = handle.to_string();
        record.phone = phone.to_string();
        self.commit(next)?;
        Ok(created)
    }

    /// Sets the wish of an existing record.
    ///
    /// # Errors
    /// `AppError::NotFound` if `id` never submitted a contact.
    pub fn upsert_wish(&mut self, id: ParticipantId, wish: &str) -> AppResult<()> {
        let mut next = self.records.clone();
        let record = next.get_mut(&id).ok_or(AppError::NotFound(id))?;
        record.wish = wish.to_string();
        self.commit(next)
    }

    pub fn get(&self, id: ParticipantId) -> Option<&ParticipantRecord> {
        self.records.get(&id)
    }

    /// Every participant, ordered by id.
    pub fn list_all(&self) -> Vec<(ParticipantId, ParticipantRecord)> {
        self.records.iter().map(|(id, record)| (*id, record.clone())).collect()
    }

    /// Participants with both phone and wish recorded.
    pub fn eligible(&self) -> Vec<(ParticipantId, ParticipantRecord)> {
        self.records
            .iter()
            .filter(|(_, record)| record.is_eligible())
            .map(|(id, record)| (*id, record.clone()))
            .collect()
    }

    /// Deletes the record and the conversation state of `id`.
    ///
    /// Returns whether a record was deleted; a bare conversation state is
    /// dropped without counting as a participant.
    pub fn remove(&mut self, id: ParticipantId) -> AppResult<bool> {
        if self.records.contains_key(&id) {
            let mut next = self.records.clone();
            next.remove(&id);
            self.commit(next)?;
            self.states.remove(&id);
            return Ok(true);
        }
        self.states.remove(&id);
        Ok(false)
    }

    /// Deletes every record and every conversation state.
    pub fn reset_all(&mut self) -> AppResult<()> {
        self.commit(Snapshot::new())?;
        self.states.clear();
        Ok(())
    }

    /// Writes the current snapshot once more. Called on shutdown.
    pub fn flush(&mut self) -> AppResult<()> {
        save_logged(self.store.as_mut(), &self.records)
    }

    /// Saves `next` and only then makes it the in-memory snapshot, so a
    /// failed save leaves memory and disk agreeing.
    fn commit(&mut self, next: Snapshot) -> AppResult<()> {
        save_logged(self.store.as_mut(), &next)?;
        self.records = next;
        Ok(())
    }
}

fn save_logged(store: &mut dyn ParticipantStore, snapshot: &Snapshot) -> AppResult<()> {
    store.save(snapshot).map_err(|e| {
        log::error!("Failed to persist participants to {}: {}", store.describe(), e);
        e
    })
}
