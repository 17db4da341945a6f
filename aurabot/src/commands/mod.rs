pub mod help;
pub mod presets;
pub mod score;

use std::sync::Arc;

use auracore::preset::PresetTable;
use teloxide::{prelude::*, utils::command::BotCommands};

use crate::{
    commands::{
        help::{help_command, start_command},
        presets::presets_command,
        score::{aura_command, recent_command},
    },
    storages::AuraEventStorageTrait,
};

/// Bot commands
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "start the bot")]
    Start,
    #[command(description = "display this help")]
    Help,
    #[command(description = "show the current aura score")]
    Aura,
    #[command(description = "show recent aura updates")]
    Recent,
    #[command(description = "list emoji with their default points")]
    Presets,
}

/// Extract a command from a message.
/// Besides plain "/help" this accepts menu button texts like "💡 /help",
/// where an emoji-only word precedes the command.
pub fn command_line(text: &str) -> Option<&str> {
    let line = text.trim();
    if line.starts_with('/') {
        return Some(line);
    }
    let (first_word, rest) = line.split_once(char::is_whitespace)?;
    let is_emoji_word = first_word
        .chars()
        .all(|c| !c.is_alphanumeric() && !c.is_ascii_punctuation());
    let rest = rest.trim_start();
    (is_emoji_word && rest.starts_with('/')).then_some(rest)
}

/// Execute a single command
pub async fn execute_command(
    bot: Bot,
    chat_id: ChatId,
    storage: Arc<dyn AuraEventStorageTrait>,
    presets: Arc<PresetTable>,
    cmd: Command,
) -> ResponseResult<()> {
    match cmd {
        Command::Start => start_command(bot, chat_id).await,
        Command::Help => help_command(bot, chat_id).await,
        Command::Aura => aura_command(bot, chat_id, storage).await,
        Command::Recent => recent_command(bot, chat_id, storage).await,
        Command::Presets => presets_command(bot, chat_id, presets).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_plain() {
        assert_eq!(command_line("/aura"), Some("/aura"));
        assert_eq!(command_line("  /help  "), Some("/help"));
    }

    #[test]
    fn test_command_line_from_keyboard_buttons() {
        assert_eq!(command_line("💡 /help"), Some("/help"));
        assert_eq!(command_line("📊 /aura"), Some("/aura"));
        assert_eq!(command_line("🗒️ /recent"), Some("/recent"));
    }

    #[test]
    fn test_aura_updates_are_not_commands() {
        assert_eq!(command_line("🔥 +10"), None);
        assert_eq!(command_line("-5 💩"), None);
        assert_eq!(command_line("🎉"), None);
        assert_eq!(command_line("great /job"), None);
    }

    #[test]
    fn test_parse_commands() {
        assert!(matches!(Command::parse("/start", "aurabot"), Ok(Command::Start)));
        assert!(matches!(Command::parse("/help", "aurabot"), Ok(Command::Help)));
        assert!(matches!(Command::parse("/aura", "aurabot"), Ok(Command::Aura)));
        assert!(matches!(Command::parse("/recent", "aurabot"), Ok(Command::Recent)));
        assert!(matches!(
            Command::parse("/presets@aurabot", "aurabot"),
            Ok(Command::Presets)
        ));
        assert!(Command::parse("/flip", "aurabot").is_err());
    }
}
