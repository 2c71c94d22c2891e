//! Event orchestration
//!
//! [`SecretSanta`] takes one inbound event to completion: admin binding,
//! registry update, admin notices and, for a draw, the notification fan-out.
//! Every non-fatal error is turned into a [`Response`] here, so the
//! transport only ever renders responses.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::admin::AdminGate;
use super::conversation::{self, Event, Reply};
use super::notifier::{Notice, Notifier};
use super::pairing::{self, DrawReport};
use super::participant::{ParticipantId, ParticipantRecord, Sender};
use crate::core::error::{AppError, AppResult};
use crate::storage::SharedRegistry;

/// Administrator-only operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    List,
    /// Raw argument text after `/remove`
    Remove(String),
    Reset,
    Draw,
}

/// What the sender of an event gets back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Conversation(Reply),
    Participants(Vec<(ParticipantId, ParticipantRecord)>),
    Removed(ParticipantId),
    UnknownParticipant(ParticipantId),
    RemoveUsage,
    ResetDone,
    DrawCompleted(DrawReport),
    NotEnoughParticipants { eligible: usize },
    Denied,
    /// Storage or other internal failure, details are in the log
    Failure,
}

pub struct SecretSanta {
    registry: SharedRegistry,
    admin: Mutex<AdminGate>,
    notifier: Arc<dyn Notifier>,
    rng: std::sync::Mutex<StdRng>,
}

impl SecretSanta {
    pub fn new(registry: SharedRegistry, admin: AdminGate, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_rng(registry, admin, notifier, StdRng::from_entropy())
    }

    /// Same as [`SecretSanta::new`] with a caller-chosen random source.
    pub fn with_rng(registry: SharedRegistry, admin: AdminGate, notifier: Arc<dyn Notifier>, rng: StdRng) -> Self {
        Self {
            registry,
            admin: Mutex::new(admin),
            notifier,
            rng: std::sync::Mutex::new(rng),
        }
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    pub async fn admin_id(&self) -> Option<ParticipantId> {
        self.admin.lock().await.admin()
    }

    /// Handles a conversational event.
    pub async fn handle_event(&self, sender: &Sender, event: Event) -> Response {
        self.observe(sender).await;

        let outcome = {
            let mut registry = self.registry.lock().await;
            conversation::handle(&mut registry, sender, event)
        };

        match outcome {
            Ok(outcome) => {
                if let Some(record) = outcome.created {
                    let notice = Notice::NewParticipant {
                        id: sender.id,
                        name: record.name,
                        handle: record.handle,
                    };
                    self.admin.lock().await.notify(self.notifier.as_ref(), notice).await;
                }
                Response::Conversation(outcome.reply)
            }
            Err(e) => into_response(e),
        }
    }

    /// Handles an administrator command, refusing anyone but the administrator.
    pub async fn handle_admin(&self, sender: &Sender, command: AdminCommand) -> Response {
        self.observe(sender).await;

        if let Err(e) = self.admin.lock().await.authorize(sender.id) {
            log::warn!("Denied {:?} for {}", command, sender.id);
            return into_response(e);
        }

        log::info!("Admin command {:?} from {}", command, sender.id);
        match self.run_admin(command).await {
            Ok(response) => response,
            Err(e) => into_response(e),
        }
    }

    /// Writes the registry one last time.
    pub async fn shutdown(&self) -> AppResult<()> {
        self.registry.lock().await.flush()
    }

    async fn run_admin(&self, command: AdminCommand) -> AppResult<Response> {
        match command {
            AdminCommand::List => Ok(Response::Participants(self.registry.lock().await.list_all())),
            AdminCommand::Remove(args) => {
                let Some(id) = args.split_whitespace().next().and_then(|arg| arg.parse::<ParticipantId>().ok()) else {
                    return Ok(Response::RemoveUsage);
                };
                if self.registry.lock().await.remove(id)? {
                    log::info!("Participant {} removed", id);
                    Ok(Response::Removed(id))
                } else {
                    Err(AppError::NotFound(id))
                }
            }
            AdminCommand::Reset => {
                self.registry.lock().await.reset_all()?;
                log::info!("Registry reset");
                Ok(Response::ResetDone)
            }
            AdminCommand::Draw => {
                let assignments = {
                    let registry = self.registry.lock().await;
                    let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
                    pairing::draw(registry.eligible(), &mut *rng)?
                };
                log::info!("Draw made {} assignments", assignments.len());

                let report = pairing::deliver_assignments(self.notifier.as_ref(), &assignments).await;
                if !report.failures.is_empty() {
                    log::warn!(
                        "Draw delivered {}/{} notifications",
                        report.delivered,
                        report.assignments
                    );
                }
                Ok(Response::DrawCompleted(report))
            }
        }
    }

    async fn observe(&self, sender: &Sender) {
        let mut admin = self.admin.lock().await;
        admin.observe(sender);
        if admin.admin() == Some(sender.id) && admin.pending() > 0 {
            let delivered = admin.flush(self.notifier.as_ref()).await;
            log::info!("Flushed {} queued admin notices", delivered);
        }
    }
}

fn into_response(error: AppError) -> Response {
    match error {
        AppError::Unauthorized => Response::Denied,
        AppError::NotFound(id) => Response::UnknownParticipant(id),
        AppError::InsufficientParticipants { eligible } => Response::NotEnoughParticipants { eligible },
        other => {
            log::error!("Request failed: {}", other);
            Response::Failure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Registry;
    use crate::testing::RecordingNotifier;

    fn service(notifier: &RecordingNotifier) -> SecretSanta {
        SecretSanta::with_rng(
            Registry::in_memory().into_shared(),
            AdminGate::with_alias("boss"),
            Arc::new(notifier.clone()),
            StdRng::seed_from_u64(11),
        )
    }

    fn boss() -> Sender {
        Sender::new(100, "Boss", Some("boss"))
    }

    #[tokio::test]
    async fn test_remove_argument_handling() {
        let notifier = RecordingNotifier::new();
        let santa = service(&notifier);

        assert_eq!(santa.handle_admin(&boss(), AdminCommand::Remove(String::new())).await, Response::RemoveUsage);
        assert_eq!(
            santa.handle_admin(&boss(), AdminCommand::Remove("abc".to_string())).await,
            Response::RemoveUsage
        );
        assert_eq!(
            santa.handle_admin(&boss(), AdminCommand::Remove("5".to_string())).await,
            Response::UnknownParticipant(ParticipantId(5))
        );
    }

    #[tokio::test]
    async fn test_new_participant_notice_reaches_admin_after_binding() {
        let notifier = RecordingNotifier::new();
        let santa = service(&notifier);
        let ann = Sender::new(1, "Ann", Some("ann"));

        santa
            .handle_event(
                &ann,
                Event::SharedContact {
                    name: "Ann".to_string(),
                    phone: "+71234567".to_string(),
                },
            )
            .await;
        assert!(notifier.sent().is_empty(), "no admin bound yet");

        santa.handle_event(&boss(), Event::Begin).await;
        assert_eq!(
            notifier.sent_to(ParticipantId(100)),
            vec![Notice::NewParticipant {
                id: ParticipantId(1),
                name: "Ann".to_string(),
                handle: "@ann".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_remove_of_start_only_user_is_unknown() {
        let notifier = RecordingNotifier::new();
        let santa = service(&notifier);
        let ann = Sender::new(1, "Ann", None);
        santa.handle_event(&ann, Event::Begin).await;

        assert_eq!(
            santa.handle_admin(&boss(), AdminCommand::Remove("1".to_string())).await,
            Response::UnknownParticipant(ParticipantId(1))
        );
    }

    #[tokio::test]
    async fn test_denial_changes_nothing() {
        let notifier = RecordingNotifier::new();
        let santa = service(&notifier);
        let ann = Sender::new(1, "Ann", None);
        santa.handle_event(&ann, Event::Text("+71234567".to_string())).await;

        assert_eq!(santa.handle_admin(&ann, AdminCommand::Reset).await, Response::Denied);
        assert_eq!(santa.handle_admin(&ann, AdminCommand::List).await, Response::Denied);
        assert_eq!(santa.registry().lock().await.list_all().len(), 1);
    }
}
