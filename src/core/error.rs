use thiserror::Error;

use crate::exchange::participant::ParticipantId;

/// Centralized error types for the application
///
/// Domain failures (`NotFound`, `InsufficientParticipants`, `Unauthorized`)
/// are turned into user-facing replies by the service layer;
/// `ConfigurationMissing` stops startup. Individual delivery failures never
/// become an `AppError`: fan-out and the admin queue handle them in place.
///
/// # Example
///
/// ```no_run
/// use santabot::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// The participant is not in the registry
    #[error("Participant {0} not found")]
    NotFound(ParticipantId),

    /// Draw attempted with fewer than two eligible participants
    #[error("Not enough eligible participants for a draw: {eligible}")]
    InsufficientParticipants { eligible: usize },

    /// Caller is not the bound administrator
    #[error("Unauthorized")]
    Unauthorized,

    /// Required startup configuration is absent
    #[error("Required configuration missing: {0}")]
    ConfigurationMissing(&'static str),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(AppError::NotFound(ParticipantId(42)).to_string(), "Participant 42 not found");
        assert_eq!(
            AppError::ConfigurationMissing("BOT_TOKEN").to_string(),
            "Required configuration missing: BOT_TOKEN"
        );
    }
}
