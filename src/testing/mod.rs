//! Testing utilities
//!
//! Used by the unit tests and by the integration tests under `tests/`.
//!
//! ```rust,ignore
//! let notifier = RecordingNotifier::new();
//! notifier.fail_for(ParticipantId(2));
//! // ... run a draw against `notifier` ...
//! assert_eq!(notifier.sent_to(ParticipantId(1)).len(), 1);
//! ```

pub mod recorder;

pub use recorder::RecordingNotifier;
