//! Administrator authorization gate
//!
//! The administrator is either configured by id, or bound at runtime to the
//! first sender whose username matches the configured alias. Notices meant
//! for the administrator wait in a queue until someone is bound, and stay
//! queued if their delivery fails.

use std::collections::VecDeque;

use super::notifier::{Notice, Notifier};
use super::participant::{ParticipantId, Sender};
use crate::core::config::admin::normalize_alias;
use crate::core::error::{AppError, AppResult};

#[derive(Debug)]
pub struct AdminGate {
    alias: Option<String>,
    admin: Option<ParticipantId>,
    pending: VecDeque<Notice>,
}

impl AdminGate {
    /// Administrator fixed by id; aliases are ignored.
    pub fn with_static(id: ParticipantId) -> Self {
        Self {
            alias: None,
            admin: Some(id),
            pending: VecDeque::new(),
        }
    }

    /// Administrator bound on the first event from `alias`.
    pub fn with_alias(alias: &str) -> Self {
        let alias = normalize_alias(alias);
        Self {
            alias: (!alias.is_empty()).then_some(alias),
            admin: None,
            pending: VecDeque::new(),
        }
    }

    /// Builds the gate from ADMIN_USER_ID / ADMIN_USERNAME.
    pub fn from_config() -> Self {
        use crate::core::config::admin::{ADMIN_USERNAME, ADMIN_USER_ID};

        match *ADMIN_USER_ID {
            Some(id) => Self::with_static(ParticipantId(id)),
            None => Self::with_alias(ADMIN_USERNAME.as_str()),
        }
    }

    pub fn admin(&self) -> Option<ParticipantId> {
        self.admin
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Binds `sender` as administrator if their username matches the alias.
    ///
    /// Returns `true` when the binding changed. Seeing the bound sender again
    /// is a no-op; another sender with the same alias takes over the binding.
    pub fn observe(&mut self, sender: &Sender) -> bool {
        let Some(alias) = self.alias.as_deref() else {
            return false;
        };
        let matches = sender
            .username
            .as_deref()
            .is_some_and(|username| normalize_alias(username) == alias);
        if !matches || self.admin == Some(sender.id) {
            return false;
        }

        if let Some(previous) = self.admin {
            log::warn!("Administrator binding moves from {} to {}", previous, sender.id);
        } else {
            log::info!("Administrator @{} bound to {}", alias, sender.id);
        }
        self.admin = Some(sender.id);
        true
    }

    /// # Errors
    /// `AppError::Unauthorized` unless `caller` is the bound administrator.
    pub fn authorize(&self, caller: ParticipantId) -> AppResult<()> {
        match self.admin {
            Some(admin) if admin == caller => Ok(()),
            _ => Err(AppError::Unauthorized),
        }
    }

    /// Sends `notice` to the administrator, or queues it when nobody is bound
    /// or delivery fails.
    pub async fn notify(&mut self, notifier: &dyn Notifier, notice: Notice) {
        self.pending.push_back(notice);
        self.flush(notifier).await;
    }

    /// Delivers queued notices in order. Undelivered ones stay queued.
    ///
    /// Returns the number delivered.
    pub async fn flush(&mut self, notifier: &dyn Notifier) -> usize {
        let Some(admin) = self.admin else {
            return 0;
        };

        let mut delivered = 0;
        let mut kept = VecDeque::new();
        while let Some(notice) = self.pending.pop_front() {
            match notifier.notify(admin, &notice).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    log::warn!("Admin notice kept for a later attempt: {}", e);
                    kept.push_back(notice);
                }
            }
        }
        self.pending = kept;
        delivered
    }
}
