use anyhow::Result;
use dotenvy::dotenv;
use secrecy::ExposeSecret;
use std::net::SocketAddr;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::update_listeners::{webhooks, Polling};

use santabot::cli::{Cli, Commands};
use santabot::core::{config, init_logger, log_configuration, AppError};
use santabot::exchange::phone::parse_phone;
use santabot::exchange::{AdminGate, SecretSanta};
use santabot::storage::{open_registry, JsonFileStore, ParticipantStore};
use santabot::telegram::messages::participant_list;
use santabot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps, TelegramNotifier};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, configuration, storage, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Log panics inside handlers instead of losing them on stderr
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    // Load environment variables from .env if present
    let _ = dotenv();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Run { webhook }) => {
            log::info!("Running bot (webhook: {})", webhook);
            run_bot(webhook).await
        }
        Some(Commands::List { file }) => run_list(file),
        Some(Commands::CheckPhone { text }) => {
            match parse_phone(&text) {
                Some(phone) => println!("✅ accepted as phone: {}", phone),
                None => println!("❌ not a phone number"),
            }
            Ok(())
        }
        None => {
            // No command specified - default to running the bot
            log::info!("No command specified, running bot in default mode");
            run_bot(false).await
        }
    }
}

/// Prints the participants file without touching Telegram
fn run_list(file: Option<String>) -> Result<()> {
    let path = file.unwrap_or_else(|| config::storage::PARTICIPANTS_FILE.clone());
    let snapshot = JsonFileStore::new(&path).load()?;
    let participants: Vec<_> = snapshot.into_iter().collect();

    for chunk in participant_list(&participants) {
        println!("{}\n", chunk);
    }
    Ok(())
}

async fn run_bot(use_webhook: bool) -> Result<()> {
    log::info!("Starting bot...");
    log_configuration();

    // Missing token is fatal: nothing is served without it
    let token = config::require_bot_token()?;

    let registry = open_registry(*config::storage::BACKEND, &config::storage::PARTICIPANTS_FILE)?.into_shared();

    let bot = create_bot(token)?;
    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let notifier = Arc::new(TelegramNotifier::new(bot.clone()));
    let santa = Arc::new(SecretSanta::new(registry, AdminGate::from_config(), notifier));

    // Create the dispatcher handler tree
    let handler = schema(HandlerDeps::new(Arc::clone(&santa)));

    if use_webhook {
        let base = config::WEBHOOK_URL
            .clone()
            .ok_or(AppError::ConfigurationMissing("WEBHOOK_URL"))?;
        let address = SocketAddr::from(([0, 0, 0, 0], *config::PORT));
        let url = url::Url::parse(&format!("{}/{}", base.trim_end_matches('/'), token.expose_secret()))?;

        log::info!("Starting bot in webhook mode on {} (public base {})", address, base);
        let listener = webhooks::axum(bot.clone(), webhooks::Options::new(address, url)).await?;

        Dispatcher::builder(bot, handler)
            .enable_ctrlc_handler()
            .build()
            .dispatch_with_listener(
                listener,
                LoggingErrorHandler::with_custom_text("An error from the update listener"),
            )
            .await;
    } else {
        log::info!("Starting bot in long polling mode");
        let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

        Dispatcher::builder(bot, handler)
            .enable_ctrlc_handler()
            .build()
            .dispatch_with_listener(
                listener,
                LoggingErrorHandler::with_custom_text("An error from the update listener"),
            )
            .await;
    }

    log::info!("Dispatcher stopped, flushing participants");
    if let Err(e) = santa.shutdown().await {
        log::error!("Failed to flush participants on shutdown: {}", e);
    }

    Ok(())
}
