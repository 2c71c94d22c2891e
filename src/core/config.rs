use once_cell::sync::Lazy;
use secrecy::SecretString;
use std::env;

use crate::core::error::{AppError, AppResult};

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
/// `None` when neither is set (or both are empty)
pub static BOT_TOKEN: Lazy<Option<SecretString>> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .ok()
        .filter(|token| !token.trim().is_empty())
        .map(SecretString::from)
});

/// Returns the bot token or fails with `ConfigurationMissing`.
pub fn require_bot_token() -> AppResult<&'static SecretString> {
    BOT_TOKEN.as_ref().ok_or(AppError::ConfigurationMissing("BOT_TOKEN"))
}

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: santabot.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "santabot.log".to_string()));

/// Public base URL for webhook mode
/// Read from WEBHOOK_URL, falling back to RENDER_EXTERNAL_URL (set by Render)
pub static WEBHOOK_URL: Lazy<Option<String>> = Lazy::new(|| {
    env::var("WEBHOOK_URL")
        .or_else(|_| env::var("RENDER_EXTERNAL_URL"))
        .ok()
        .filter(|url| !url.is_empty())
});

/// Port the webhook listener binds to
/// Read from PORT environment variable
/// Default: 10000
pub static PORT: Lazy<u16> = Lazy::new(|| {
    env::var("PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(10000)
});

/// Administrator configuration
pub mod admin {
    use super::*;

    /// Username that binds the administrator on first contact
    /// Read from ADMIN_USERNAME environment variable, leading '@' stripped
    /// Default: pravda_smm
    pub static ADMIN_USERNAME: Lazy<String> = Lazy::new(|| {
        normalize_alias(&env::var("ADMIN_USERNAME").unwrap_or_else(|_| "pravda_smm".to_string()))
    });

    /// Static administrator user ID
    /// Read from ADMIN_USER_ID environment variable
    /// When set, the alias binding above is not used
    pub static ADMIN_USER_ID: Lazy<Option<u64>> = Lazy::new(|| {
        env::var("ADMIN_USER_ID")
            .ok()
            .and_then(|id| id.trim().parse::<u64>().ok())
            .filter(|id| *id != 0)
    });

    /// Strips the leading '@' and lowercases a Telegram alias.
    pub fn normalize_alias(alias: &str) -> String {
        alias.trim().trim_start_matches('@').to_lowercase()
    }
}

/// Participant storage configuration
pub mod storage {
    use super::*;

    /// Which registry backing to use
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Backend {
        /// JSON snapshot rewritten on every mutation
        File,
        /// Process-local map, lost on restart
        Memory,
    }

    impl Backend {
        /// Parses the STORAGE_BACKEND value, unknown values fall back to `File`.
        pub fn parse(value: &str) -> Self {
            match value.trim().to_lowercase().as_str() {
                "memory" | "mem" | "inmemory" => Backend::Memory,
                _ => Backend::File,
            }
        }
    }

    /// Participants snapshot path
    /// Read from PARTICIPANTS_FILE environment variable
    /// Default: users.json
    pub static PARTICIPANTS_FILE: Lazy<String> =
        Lazy::new(|| env::var("PARTICIPANTS_FILE").unwrap_or_else(|_| "users.json".to_string()));

    /// Read from STORAGE_BACKEND environment variable
    /// Default: file
    pub static BACKEND: Lazy<Backend> =
        Lazy::new(|| env::var("STORAGE_BACKEND").map(|v| Backend::parse(&v)).unwrap_or(Backend::File));
}

/// Network configuration
pub mod network {
    use std::time::Duration;

    /// Telegram API request timeout (in seconds)
    pub const TIMEOUT_SECS: u64 = 30;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(TIMEOUT_SECS)
    }
}

/// Telegram limits
pub mod telegram {
    /// Maximum message length for Telegram (with margin)
    pub const MAX_MESSAGE_LENGTH: usize = 4000;
}

#[cfg(test)]
mod tests {
    use super::admin::normalize_alias;
    use super::storage::Backend;

    #[test]
    fn test_normalize_alias() {
        assert_eq!(normalize_alias("@Pravda_SMM"), "pravda_smm");
        assert_eq!(normalize_alias("  someone "), "someone");
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!(Backend::parse("memory"), Backend::Memory);
        assert_eq!(Backend::parse("MEM"), Backend::Memory);
        assert_eq!(Backend::parse("file"), Backend::File);
        assert_eq!(Backend::parse("whatever"), Backend::File);
    }
}
