//! Notifier that records notices instead of sending them
//!
//! Delivery to selected participants can be made to fail, which lets tests
//! check that fan-out keeps going and that the admin queue keeps undelivered
//! entries.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::exchange::notifier::{DeliveryError, Notice, Notifier};
use crate::exchange::participant::ParticipantId;

/// Records every delivered notice, in delivery order.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(ParticipantId, Notice)>>>,
    failing: Arc<Mutex<HashSet<ParticipantId>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliveries to `id` fail until [`RecordingNotifier::recover`] is called.
    pub fn fail_for(&self, id: ParticipantId) {
        self.failing.lock().unwrap_or_else(|e| e.into_inner()).insert(id);
    }

    pub fn recover(&self, id: ParticipantId) {
        self.failing.lock().unwrap_or_else(|e| e.into_inner()).remove(&id);
    }

    /// Everything delivered so far.
    pub fn sent(&self) -> Vec<(ParticipantId, Notice)> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Notices delivered to one participant.
    pub fn sent_to(&self, id: ParticipantId) -> Vec<Notice> {
        self.sent()
            .into_iter()
            .filter(|(to, _)| *to == id)
            .map(|(_, notice)| notice)
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, to: ParticipantId, notice: &Notice) -> Result<(), DeliveryError> {
        if self.failing.lock().unwrap_or_else(|e| e.into_inner()).contains(&to) {
            return Err(DeliveryError::new(to, "Forbidden: bot was blocked by the user"));
        }
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((to, notice.clone()));
        Ok(())
    }
}
