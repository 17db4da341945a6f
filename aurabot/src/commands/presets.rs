use std::sync::Arc;

use auracore::{format_points, preset::PresetTable};
use teloxide::prelude::*;

/// Emoji guide: one preset per line, "🔥 +10 Fire!"
pub fn format_presets(presets: &PresetTable) -> String {
    let mut result = String::from("Emoji with default points:\n");
    for preset in presets.iter() {
        result.push_str(&format!(
            "{} {} {}\n",
            preset.emoji,
            format_points(preset.points),
            preset.label
        ));
    }
    result
}

pub async fn presets_command(
    bot: Bot,
    chat_id: ChatId,
    presets: Arc<PresetTable>,
) -> ResponseResult<()> {
    bot.send_message(chat_id, format_presets(&presets)).await?;
    Ok(())
}
