//! User-facing texts and keyboards
//!
//! Everything the bot says is rendered here from exchange [`Response`]s and
//! [`Notice`]s. Texts with formatting use MarkdownV2 and escape every
//! user-supplied fragment.

use indoc::indoc;
use teloxide::types::{
    ButtonRequest, KeyboardButton, KeyboardMarkup, KeyboardRemove, ParseMode, ReplyMarkup,
};
use teloxide::utils::markdown::{bold, escape, italic};

use crate::core::config::telegram::MAX_MESSAGE_LENGTH;
use crate::exchange::{DrawReport, Notice, ParticipantId, ParticipantRecord, Reply, Response};

/// One outgoing message.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub text: String,
    pub markup: Option<ReplyMarkup>,
    pub parse_mode: Option<ParseMode>,
}

impl Rendered {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: None,
            parse_mode: None,
        }
    }

    fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: None,
            parse_mode: Some(ParseMode::MarkdownV2),
        }
    }

    fn with_markup(mut self, markup: ReplyMarkup) -> Self {
        self.markup = Some(markup);
        self
    }
}

/// Keyboard with a single contact-request button.
pub fn contact_keyboard() -> ReplyMarkup {
    let button = KeyboardButton::new("📱 Поделись своим контактом в tg").request(ButtonRequest::Contact);
    ReplyMarkup::Keyboard(KeyboardMarkup::new(vec![vec![button]]).one_time_keyboard().resize_keyboard())
}

fn remove_keyboard() -> ReplyMarkup {
    ReplyMarkup::KeyboardRemove(KeyboardRemove::new())
}

fn welcome() -> String {
    format!(
        "{}\n\n{} 🎅\n{}\n\n{} 👇",
        escape("Приветствую тебя, сотрудник одного из трёх центров!"),
        bold(&escape("Я — Тайный Санта для ЦЕНТРОВЫХ.")),
        escape(indoc! {"
            Как ты уже и сам догадался, этот бот был создан специально для сотрудников \
            ЦУР, СЦ (общественно-политический блок) и МЦУ."}),
        escape("Чтобы принять участие в игре — нажми на кнопку ниже"),
    )
}

fn ask_wish() -> String {
    format!(
        "{} 🎁\n\n{} {} {}\n\n{}",
        escape("Отлично! Остался ещё один маленький этап, и ты в игре"),
        escape("Напиши свои"),
        bold(&escape("пожелания к подарку")),
        escape("и отправь их мне сюда сообщением."),
        italic(&escape(
            "Честно-честно, я никому не расскажу. Знать будет только твой тайный Санта после жеребьёвки."
        )),
    )
}

/// Renders a reply to the sender. Long participant lists come out as several messages.
pub fn render_response(response: &Response) -> Vec<Rendered> {
    let single = match response {
        Response::Conversation(reply) => render_reply(*reply),
        Response::Participants(participants) => {
            return participant_list(participants).into_iter().map(Rendered::plain).collect();
        }
        Response::Removed(id) => Rendered::plain(format!("Пользователь {} удалён ✅", id)),
        Response::UnknownParticipant(_) => Rendered::plain("Такого пользователя нет."),
        Response::RemoveUsage => Rendered::plain("Используй: /remove <user_id>"),
        Response::ResetDone => Rendered::plain("База участников сброшена 🗑️"),
        Response::DrawCompleted(report) => Rendered::plain(draw_summary(report)),
        Response::NotEnoughParticipants { eligible } => Rendered::plain(format!(
            "Недостаточно участников для жеребьёвки 😅\nГотовы к игре: {}",
            eligible
        )),
        Response::Denied => Rendered::plain("Нет доступа 🚫"),
        Response::Failure => Rendered::plain("Что-то пошло не так. Попробуй ещё раз чуть позже."),
    };
    vec![single]
}

fn render_reply(reply: Reply) -> Rendered {
    match reply {
        Reply::ContactPrompt => Rendered::markdown(welcome()).with_markup(contact_keyboard()),
        Reply::InvalidContact => Rendered::plain(indoc! {"
            Не похоже на номер телефона 🤔

            Нажми на кнопку ниже, чтобы поделиться контактом, или отправь номер сообщением."})
        .with_markup(contact_keyboard()),
        Reply::AskWish => Rendered::markdown(ask_wish()).with_markup(remove_keyboard()),
        Reply::ContactUpdated => Rendered::plain("Контакт обновлён ✅"),
        Reply::Registered => Rendered::plain(indoc! {"
            🎉 Поздравляю! Теперь ты участвуешь в игре.

            После жеребьёвки ты узнаешь имя и пожелания того, для кого будешь Тайным Сантой. Удачи!

            Если захочешь изменить пожелание, просто пришли новое сообщением."}),
        Reply::WishUpdated => Rendered::plain("Пожелание обновлено 🎁"),
        Reply::NotRegistered => Rendered::plain("Чтобы начать сначала, нажми /start"),
    }
}

/// Renders a notice sent on the bot's own initiative.
pub fn render_notice(notice: &Notice) -> Rendered {
    match notice {
        Notice::Assignment {
            receiver_name,
            receiver_wish,
        } => {
            let name = if receiver_name.is_empty() { "—" } else { receiver_name.as_str() };
            let wish = if receiver_wish.is_empty() { "не указано" } else { receiver_wish.as_str() };
            Rendered::markdown(format!(
                "{}\n\n{} {}\n{} {}",
                escape("🎅 Вот человек, которому ты будешь Тайным Сантой!"),
                escape("Имя:"),
                bold(&escape(name)),
                escape("Пожелание:"),
                italic(&escape(wish)),
            ))
        }
        Notice::NewParticipant { id, name, handle } => {
            let handle = if handle.is_empty() { String::new() } else { format!(" {}", handle) };
            Rendered::plain(format!("🆕 Новый участник: {}{} (id {})", name, handle, id))
        }
    }
}

fn participant_entry(id: ParticipantId, record: &ParticipantRecord) -> String {
    let or_dash = |s: &str| if s.trim().is_empty() { "—".to_string() } else { s.to_string() };
    let handle = if record.handle.is_empty() {
        String::new()
    } else {
        format!(" {}", record.handle)
    };
    format!(
        "{}{} [{}] — {}\n🎁 {}",
        record.name,
        handle,
        id,
        or_dash(&record.phone),
        or_dash(&record.wish)
    )
}

/// Admin listing split into messages under the Telegram length limit.
pub fn participant_list(participants: &[(ParticipantId, ParticipantRecord)]) -> Vec<String> {
    if participants.is_empty() {
        return vec!["Пока пусто.".to_string()];
    }

    let entries = participants.iter().map(|(id, record)| participant_entry(*id, record));
    chunk_entries(
        &format!("📋 Участники ({}):", participants.len()),
        entries,
        MAX_MESSAGE_LENGTH,
    )
}

/// Joins entries with blank lines, starting a new message whenever the next
/// entry would push the current one past `limit` characters. An entry longer
/// than `limit` is cut.
fn chunk_entries(header: &str, entries: impl Iterator<Item = String>, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = header.to_string();

    for entry in entries {
        let entry: String = entry.chars().take(limit).collect();
        let needed = current.chars().count() + 2 + entry.chars().count();
        if needed > limit && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push_str("\n\n");
        }
        current.push_str(&entry);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn draw_summary(report: &DrawReport) -> String {
    let mut text = format!(
        "✅ Сообщения участникам отправлены!\nДоставлено: {} из {}",
        report.delivered, report.assignments
    );
    if !report.failures.is_empty() {
        let ids: Vec<String> = report.failures.iter().map(|f| f.target.to_string()).collect();
        text.push_str(&format!("\n\n⚠️ Не удалось отправить: {}", ids.join(", ")));
    }
    text
}
