//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - Configuration summary logged once at startup

use anyhow::Result;
use simplelog::*;
use std::fs::File;
use std::path::Path;

use crate::core::config;

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file, truncated if it exists
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Log file could not be created or a logger is already installed
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = open_log_file(log_file_path)?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Creates the log file together with any missing parent directories.
fn open_log_file(log_file_path: &str) -> Result<File> {
    let path = Path::new(log_file_path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    File::create(path).map_err(|e| anyhow::anyhow!("Failed to create log file {}: {}", log_file_path, e))
}

/// Logs the effective configuration at application startup
///
/// The token itself is never logged, only whether it is present.
pub fn log_configuration() {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("🎅 Configuration");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if config::BOT_TOKEN.is_some() {
        log::info!("✅ BOT_TOKEN: set");
    } else {
        log::error!("❌ BOT_TOKEN: not set");
    }

    match *config::admin::ADMIN_USER_ID {
        Some(id) => log::info!("✅ ADMIN_USER_ID: {} (static binding)", id),
        None => log::info!(
            "ℹ️  ADMIN_USERNAME: @{} (binds on first message)",
            config::admin::ADMIN_USERNAME.as_str()
        ),
    }

    match *config::storage::BACKEND {
        config::storage::Backend::File => {
            log::info!("💾 Storage: JSON file {}", config::storage::PARTICIPANTS_FILE.as_str())
        }
        config::storage::Backend::Memory => {
            log::warn!("⚠️  Storage: in-memory, participants are lost on restart")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn test_open_log_file_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs/nested/santabot.log");

        open_log_file(path.to_str().unwrap()).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_open_log_file_truncates_previous_run() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("santabot.log");
        std::fs::write(&path, "old run").unwrap();

        open_log_file(path.to_str().unwrap()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_open_log_file_fails_on_directory() {
        let dir = TempDir::new().unwrap();
        let err = open_log_file(dir.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Failed to create log file"));
    }
}
