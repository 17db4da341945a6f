use std::{fmt::Display, sync::Arc};

use auracore::format_points;
use chrono::{Local, TimeZone};
use teloxide::prelude::*;

use crate::{
    storages::{AuraEvent, AuraEventStorageTrait},
    totals::{current_total, today_count, today_total},
};

pub const RECENT_EVENTS_LIMIT: usize = 10;

/// Score summary with the totals of the current day
pub fn format_aura_summary(events: &[AuraEvent], day_total: i64, day_count: usize) -> String {
    if events.is_empty() {
        return "No aura updates recorded yet.".to_string();
    }
    format!(
        "✨ Aura: {}\nToday: {} ({} updates)\nAll time: {} updates",
        current_total(events),
        format_points(day_total),
        day_count,
        events.len()
    )
}

/// Latest events first, one per line: "2024-05-01 12:00 🔥 +10 note"
pub fn format_recent_events<Tz: TimeZone>(events: &[AuraEvent], limit: usize, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    if events.is_empty() {
        return "No aura updates recorded yet.".to_string();
    }

    let mut sorted_events = events.to_vec();
    sorted_events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));

    let mut result = String::new();
    for event in sorted_events.iter().take(limit) {
        result.push_str(&format!(
            "{} {} {}",
            event.timestamp.with_timezone(tz).format("%Y-%m-%d %H:%M"),
            event.emoji,
            format_points(event.points)
        ));
        if let Some(note) = &event.note {
            result.push(' ');
            result.push_str(note);
        }
        result.push('\n');
    }
    result
}

pub async fn aura_command(
    bot: Bot,
    chat_id: ChatId,
    storage: Arc<dyn AuraEventStorageTrait>,
) -> ResponseResult<()> {
    let text = match storage.get_chat_events(chat_id).await {
        Ok(events) => format_aura_summary(&events, today_total(&events), today_count(&events)),
        Err(e) => format!("❌ Error: {}", e),
    };
    bot.send_message(chat_id, text).await?;
    Ok(())
}

pub async fn recent_command(
    bot: Bot,
    chat_id: ChatId,
    storage: Arc<dyn AuraEventStorageTrait>,
) -> ResponseResult<()> {
    let text = match storage.get_chat_events(chat_id).await {
        Ok(events) => format_recent_events(&events, RECENT_EVENTS_LIMIT, &Local),
        Err(e) => format!("❌ Error: {}", e),
    };
    bot.send_message(chat_id, text).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::{
        storages::AuraSource,
        totals::{day_count, day_total},
    };

    fn event(id: u64, emoji: &str, points: i64, note: Option<&str>, day: u32, hour: u32) -> AuraEvent {
        AuraEvent {
            id,
            timestamp: Utc.with_ymd_and_hms(2024, 5, day, hour, 30, 0).unwrap(),
            emoji: emoji.to_string(),
            points,
            note: note.map(|n| n.to_string()),
            source: AuraSource::Telegram,
        }
    }

    #[test]
    fn test_format_aura_summary() {
        let events = vec![
            event(1, "🔥", 10, None, 1, 9),
            event(2, "💩", -5, None, 2, 9),
            event(3, "🎉", 15, Some("party"), 2, 18),
        ];
        let day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        assert_eq!(
            format_aura_summary(&events, day_total(&events, day, &Utc), day_count(&events, day, &Utc)),
            "✨ Aura: 20\nToday: +10 (2 updates)\nAll time: 3 updates"
        );
    }

    #[test]
    fn test_format_aura_summary_empty() {
        assert_eq!(
            format_aura_summary(&[], 0, 0),
            "No aura updates recorded yet."
        );
    }

    #[test]
    fn test_format_recent_events_newest_first() {
        let events = vec![
            event(1, "🔥", 10, None, 1, 9),
            event(2, "💩", -5, Some("dishes"), 2, 9),
            event(3, "🎉", 15, None, 3, 18),
        ];
        assert_eq!(
            format_recent_events(&events, 2, &Utc),
            "2024-05-03 18:30 🎉 +15\n2024-05-02 09:30 💩 -5 dishes\n"
        );
    }

    #[test]
    fn test_format_recent_events_empty() {
        assert_eq!(
            format_recent_events(&[], RECENT_EVENTS_LIMIT, &Utc),
            "No aura updates recorded yet."
        );
    }
}
