use async_trait::async_trait;
use teloxide::prelude::*;

use super::messages::{render_notice, Rendered};
use crate::exchange::{DeliveryError, Notice, Notifier, ParticipantId};

/// Sends exchange notices as private Telegram messages.
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, to: ParticipantId, notice: &Notice) -> Result<(), DeliveryError> {
        let chat_id = i64::try_from(to.0)
            .map(ChatId)
            .map_err(|_| DeliveryError::new(to, "participant id does not fit a chat id"))?;

        send_rendered(&self.bot, chat_id, render_notice(notice))
            .await
            .map(|_| ())
            .map_err(|e| DeliveryError::new(to, e))
    }
}

/// Sends one rendered message with its markup and parse mode.
pub async fn send_rendered(bot: &Bot, chat_id: ChatId, rendered: Rendered) -> Result<Message, teloxide::RequestError> {
    let mut request = bot.send_message(chat_id, rendered.text);
    if let Some(markup) = rendered.markup {
        request = request.reply_markup(markup);
    }
    if let Some(parse_mode) = rendered.parse_mode {
        request = request.parse_mode(parse_mode);
    }
    request.await
}
