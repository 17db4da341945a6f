use std::sync::Arc;

use auracore::{MessageParser, format_points, preset::PresetTable, text::Segmenter};
use chrono::{DateTime, Utc};
use teloxide::{prelude::*, utils::command::BotCommands};

use crate::{
    commands::{Command, command_line, execute_command, help::PARSE_HINT},
    storages::{AuraEventStorageTrait, AuraSource},
    totals::current_total,
};

/// What to do with an incoming text message
#[derive(Debug)]
pub enum MessageRoute {
    Command(Command),
    CommandError(String),
    AuraUpdate,
}

/// Decide whether a message is a command or an aura update.
/// A failed command behind an emoji prefix ("🎉 /shrug") is an aura update with a note,
/// only text starting with "/" reports command errors.
pub fn route_message(text: &str, bot_name: &str) -> MessageRoute {
    let Some(line) = command_line(text) else {
        return MessageRoute::AuraUpdate;
    };
    match Command::parse(line, bot_name) {
        Ok(cmd) => MessageRoute::Command(cmd),
        Err(_) if !text.trim_start().starts_with('/') => MessageRoute::AuraUpdate,
        Err(e) => MessageRoute::CommandError(e.to_string()),
    }
}

/// Handle text messages: commands or aura updates like "🔥 +10"
pub async fn handle_text_message(
    bot: Bot,
    msg: Message,
    storage: Arc<dyn AuraEventStorageTrait>,
    presets: Arc<PresetTable>,
    segmenter: Segmenter,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat_id = msg.chat.id;
    log::info!("Received message in chat {}: {}", chat_id, text);

    // Get bot username so that "/aura@botname" is accepted
    let bot_name = bot
        .get_me()
        .await
        .ok()
        .map(|me| me.username().to_string())
        .unwrap_or_default();

    match route_message(text, &bot_name) {
        MessageRoute::Command(cmd) => execute_command(bot, chat_id, storage, presets, cmd).await,
        MessageRoute::CommandError(e) => {
            log::warn!("Command parse error in chat {}: {}", chat_id, e);
            bot.send_message(chat_id, format!("❌ {}", e)).await?;
            Ok(())
        }
        MessageRoute::AuraUpdate => {
            // Use forward_date if available (for forwarded messages), otherwise use msg.date
            let timestamp = msg.forward_date().unwrap_or(msg.date);
            let parser = MessageParser::with_strategy(&presets, segmenter);
            let reply = aura_update_reply(storage, &parser, chat_id, text, timestamp).await;
            bot.send_message(chat_id, reply).await?;
            Ok(())
        }
    }
}

/// Parse an aura update, store it and build the confirmation text
pub async fn aura_update_reply(
    storage: Arc<dyn AuraEventStorageTrait>,
    parser: &MessageParser<'_>,
    chat_id: ChatId,
    text: &str,
    timestamp: DateTime<Utc>,
) -> String {
    let Some(parsed) = parser.parse(text) else {
        return PARSE_HINT.to_string();
    };
    log::info!(
        "Parsed aura update in chat {}: {} {}",
        chat_id,
        parsed.emoji,
        parsed.points
    );

    let event = match storage
        .add_event(chat_id, parsed, AuraSource::Telegram, timestamp)
        .await
    {
        Ok(event) => event,
        Err(e) => {
            log::error!("Failed to save aura update in chat {}: {}", chat_id, e);
            return format!("❌ Error saving aura update: {}", e);
        }
    };

    let total = match storage.get_chat_events(chat_id).await {
        Ok(events) => current_total(&events),
        Err(e) => {
            log::error!("Failed to read events of chat {}: {}", chat_id, e);
            return format!("❌ Error: {}", e);
        }
    };

    format!(
        "{} {} recorded! Aura: {}",
        event.emoji,
        format_points(event.points),
        total
    )
}
