use chrono::{Local, NaiveDate, TimeZone};

use crate::storages::AuraEvent;

/// Sum of points over all events. Saturates at the i64 bounds.
pub fn current_total(events: &[AuraEvent]) -> i64 {
    events
        .iter()
        .fold(0i64, |sum, event| sum.saturating_add(event.points))
}

fn is_on_day<Tz: TimeZone>(event: &AuraEvent, day: NaiveDate, tz: &Tz) -> bool {
    event.timestamp.with_timezone(tz).date_naive() == day
}

/// Sum of points of events that happened on `day` in timezone `tz`
pub fn day_total<Tz: TimeZone>(events: &[AuraEvent], day: NaiveDate, tz: &Tz) -> i64 {
    events
        .iter()
        .filter(|event| is_on_day(event, day, tz))
        .fold(0i64, |sum, event| sum.saturating_add(event.points))
}

/// Number of events that happened on `day` in timezone `tz`
pub fn day_count<Tz: TimeZone>(events: &[AuraEvent], day: NaiveDate, tz: &Tz) -> usize {
    events
        .iter()
        .filter(|event| is_on_day(event, day, tz))
        .count()
}

/// Today's total in the local calendar day
pub fn today_total(events: &[AuraEvent]) -> i64 {
    day_total(events, Local::now().date_naive(), &Local)
}

/// Number of events in the local calendar day
pub fn today_count(events: &[AuraEvent]) -> usize {
    day_count(events, Local::now().date_naive(), &Local)
}
