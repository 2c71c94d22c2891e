//! Endpoint implementations: commands, shared contacts, plain text

use teloxide::prelude::*;
use teloxide::types::{Contact, Message};

use super::types::{sender_from_message, HandlerDeps, HandlerError};
use crate::exchange::{AdminCommand, Event, Response};
use crate::telegram::bot::Command;
use crate::telegram::messages::render_response;
use crate::telegram::notifications::send_rendered;

/// Maps a bot command onto the exchange.
pub(super) async fn handle_command(bot: &Bot, msg: &Message, cmd: Command, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let Some(sender) = sender_from_message(msg) else {
        return Ok(());
    };

    let response = match cmd {
        Command::Start => deps.santa.handle_event(&sender, Event::Begin).await,
        Command::List => deps.santa.handle_admin(&sender, AdminCommand::List).await,
        Command::Remove(args) => deps.santa.handle_admin(&sender, AdminCommand::Remove(args)).await,
        Command::Reset => deps.santa.handle_admin(&sender, AdminCommand::Reset).await,
        Command::Draw => deps.santa.handle_admin(&sender, AdminCommand::Draw).await,
    };

    reply(bot, msg.chat.id, &response).await
}

/// Contact shared through the keyboard button.
pub(super) async fn handle_contact(
    bot: &Bot,
    msg: &Message,
    contact: Contact,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    let Some(sender) = sender_from_message(msg) else {
        return Ok(());
    };

    if contact.user_id.is_some_and(|owner| owner.0 != sender.id.0) {
        log::info!("{} shared someone else's contact", sender.id);
    }

    let event = Event::SharedContact {
        name: contact.first_name,
        phone: contact.phone_number,
    };
    let response = deps.santa.handle_event(&sender, event).await;
    reply(bot, msg.chat.id, &response).await
}

/// Any text that is not a command.
pub(super) async fn handle_text(bot: &Bot, msg: &Message, text: String, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let Some(sender) = sender_from_message(msg) else {
        return Ok(());
    };

    let response = deps.santa.handle_event(&sender, Event::Text(text)).await;
    reply(bot, msg.chat.id, &response).await
}

async fn reply(bot: &Bot, chat_id: ChatId, response: &Response) -> Result<(), HandlerError> {
    for rendered in render_response(response) {
        if let Err(e) = send_rendered(bot, chat_id, rendered).await {
            log::warn!("Failed to reply to {}: {}", chat_id, e);
        }
    }
    Ok(())
}
