//! Common test utilities
//!
//! This module is shared across all integration tests

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

use santabot::exchange::{AdminGate, Event, Response, SecretSanta, Sender};
use santabot::storage::Registry;
use santabot::testing::RecordingNotifier;

pub const ADMIN_ALIAS: &str = "santa_admin";

pub fn admin() -> Sender {
    Sender::new(900, "Admin", Some(ADMIN_ALIAS))
}

/// Service over an in-memory registry with the admin bound by alias.
pub fn santa_with(registry: Registry, seed: u64) -> (SecretSanta, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let santa = SecretSanta::with_rng(
        registry.into_shared(),
        AdminGate::with_alias(ADMIN_ALIAS),
        Arc::new(notifier.clone()),
        StdRng::seed_from_u64(seed),
    );
    (santa, notifier)
}

pub fn santa(seed: u64) -> (SecretSanta, RecordingNotifier) {
    santa_with(Registry::in_memory(), seed)
}

/// Runs start → contact → wish for `sender`, returning the last response.
pub async fn register(santa: &SecretSanta, sender: &Sender, phone: &str, wish: &str) -> Response {
    santa.handle_event(sender, Event::Begin).await;
    santa
        .handle_event(
            sender,
            Event::SharedContact {
                name: sender.full_name.clone(),
                phone: phone.to_string(),
            },
        )
        .await;
    santa.handle_event(sender, Event::Text(wish.to_string())).await
}
