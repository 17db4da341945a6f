use teloxide::{
    payloads::SendMessageSetters,
    prelude::*,
    types::{KeyboardButton, KeyboardMarkup, ReplyMarkup},
    utils::command::BotCommands,
};

use super::Command;

/// Text shown when a message is neither a command nor an aura update
pub const PARSE_HINT: &str = "Could not parse aura update. Try: \"🔥 +10\" or \"💩 -5\"";

pub fn help_text() -> String {
    format!(
        "Send an emoji with points to update the aura score:\n\
        🔥 +10\n\
        -5 💩\n\
        🎉 (uses the default points of the emoji)\n\
        🔥 +10 Great job dad! (text after the points is kept as a note)\n\n\
        {commands}",
        commands = Command::descriptions()
    )
}

pub async fn help_command(bot: Bot, chat_id: ChatId) -> ResponseResult<()> {
    bot.send_message(chat_id, help_text()).await?;
    Ok(())
}

pub async fn start_command(bot: Bot, chat_id: ChatId) -> ResponseResult<()> {
    // Send a follow-up message to set the persistent reply keyboard menu
    bot.send_message(
        chat_id,
        format!(
            "🤖 Aura Bot v{}\nMenu buttons are available",
            env!("CARGO_PKG_VERSION")
        ),
    )
    .reply_markup(create_menu_keyboard())
    .await?;

    help_command(bot, chat_id).await
}

/// Create a persistent menu keyboard that shows on the left of the input field
pub fn create_menu_keyboard() -> ReplyMarkup {
    let keyboard = vec![vec![
        KeyboardButton::new("📊 /aura"),
        KeyboardButton::new("🗒️ /recent"),
        KeyboardButton::new("📖 /presets"),
        KeyboardButton::new("💡 /help"),
    ]];
    ReplyMarkup::Keyboard(KeyboardMarkup::new(keyboard).resize_keyboard().persistent())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::command_line;

    #[test]
    fn test_help_lists_commands() {
        let text = help_text();
        for command in ["/aura", "/recent", "/presets", "/help", "/start"] {
            assert!(text.contains(command), "missing {}", command);
        }
    }

    #[test]
    fn test_menu_buttons_are_commands() {
        let ReplyMarkup::Keyboard(markup) = create_menu_keyboard() else {
            panic!("expected reply keyboard");
        };
        for button in markup.keyboard.iter().flatten() {
            let line = command_line(&button.text).expect("button must carry a command");
            assert!(Command::parse(line, "").is_ok(), "{}", button.text);
        }
    }
}
