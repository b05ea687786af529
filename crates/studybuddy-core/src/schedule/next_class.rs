//! Soonest upcoming occurrence of a weekly class.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::clock::{self, DAYS_PER_WEEK, MINUTES_PER_DAY};
use crate::model::ScheduleEvent;

/// The next class and how far away it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextClassInfo {
    pub event: ScheduleEvent,
    /// Remaining time, e.g. `"2 days 3 hours"`.
    pub time_until: String,
    pub formatted: String,
    /// Whole days to the occurrence's weekday, `0..=7`. Seven means the
    /// same weekday next week.
    #[serde(skip)]
    pub days_until: u8,
    #[serde(skip)]
    pub minutes_until: i64,
}

/// Find the next class after `now`.
///
/// Today's classes count only if they start strictly after the current
/// minute. When nothing is left this week the earliest class of the week is
/// reported one full week out, never as "now". Events with an unknown
/// weekday or malformed start time are ignored; `None` when nothing is left.
pub fn find_next_class(events: &[ScheduleEvent], now: NaiveDateTime) -> Option<NextClassInfo> {
    let today = clock::weekday_of(&now);
    let current = clock::minutes_of_day(&now);

    let timed: Vec<(&ScheduleEvent, u8, u32)> = events
        .iter()
        .filter_map(|e| Some((e, e.weekday()?, e.start().minutes()?)))
        .collect();

    let upcoming = timed
        .iter()
        .filter_map(|&(event, day, start)| {
            let days = clock::days_until(today, day);
            (days > 0 || start > current).then_some((days, start, event))
        })
        .min_by_key(|&(days, start, _)| (days, start));

    let (days, start, event) = match upcoming {
        Some(found) => found,
        None => {
            let &(event, day, start) = timed.iter().min_by_key(|&&(_, day, start)| (day, start))?;
            let days = match (DAYS_PER_WEEK + day - today) % DAYS_PER_WEEK {
                0 => DAYS_PER_WEEK,
                d => d,
            };
            (days, start, event)
        }
    };

    let minutes_until = i64::from(days) * MINUTES_PER_DAY + i64::from(start) - i64::from(current);
    let time_until = format_time_until(minutes_until);
    let formatted = format!(
        "Your next class is {} {} at {} in {} starting in {}",
        event.module,
        event.kind,
        clock::display_clock(&event.start_time),
        event.venue_or("TBA"),
        time_until
    );

    Some(NextClassInfo {
        event: event.clone(),
        time_until,
        formatted,
        days_until: days,
        minutes_until,
    })
}

/// Render minutes as `"D days H hours"`, `"H hours M minutes"` or
/// `"M minutes"`, dropping zero-valued leading units.
pub fn format_time_until(minutes: i64) -> String {
    let minutes = minutes.max(0);
    let hours = minutes / 60;
    let days = hours / 24;
    if days > 0 {
        format!("{days} days {} hours", hours % 24)
    } else if hours > 0 {
        format!("{hours} hours {} minutes", minutes % 60)
    } else {
        format!("{minutes} minutes")
    }
}
