//! "What should I do right now?"
//!
//! First match wins:
//!
//! 1. **TASK**: the nearest upcoming deadline, whatever its tier. Deadlines
//!    always beat classes.
//! 2. **CLASS**: a class today starting within the next
//!    [`AdvisorPolicy::class_soon_minutes`] (inclusive of now); failing that,
//!    a class tomorrow starting at or before
//!    [`AdvisorPolicy::tomorrow_cutoff`].
//! 3. **IDLE**: nothing pressing.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::clock::{self, DAYS_PER_WEEK};
use crate::model::{timetable_order, ScheduleEvent, Task};
use crate::urgency::{most_urgent, RankedTask, UrgencyTier};

pub const IDLE_MESSAGE: &str = "No urgent tasks. You can work ahead!";

/// Thresholds for class suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvisorPolicy {
    /// Window in minutes for "starting soon" today.
    pub class_soon_minutes: u32,
    /// Latest start, in minutes since midnight, for a tomorrow suggestion.
    pub tomorrow_cutoff: u32,
}

impl Default for AdvisorPolicy {
    fn default() -> Self {
        Self {
            class_soon_minutes: 60,
            tomorrow_cutoff: 14 * 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SuggestionKind {
    Task,
    Class,
    Idle,
}

/// Payload attached to a suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SuggestionData {
    #[serde(rename_all = "camelCase")]
    Task {
        task: Task,
        hours_until: f64,
        urgency: UrgencyTier,
    },
    #[serde(rename_all = "camelCase")]
    ClassSoon {
        event: ScheduleEvent,
        minutes_until: u32,
    },
    #[serde(rename_all = "camelCase")]
    ClassTomorrow {
        event: ScheduleEvent,
        days_until: u8,
    },
}

/// Right-now widget payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RightNow {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub message: String,
    pub data: Option<SuggestionData>,
}

impl RightNow {
    fn task(ranked: RankedTask) -> Self {
        let message = format!(
            "Focus on {} - {} | Due in {} ({})",
            ranked.task.course, ranked.task.title, ranked.time_until, ranked.tier
        );
        Self {
            kind: SuggestionKind::Task,
            message,
            data: Some(SuggestionData::Task {
                hours_until: (ranked.hours_until * 100.0).round() / 100.0,
                urgency: ranked.tier,
                task: ranked.task,
            }),
        }
    }

    fn class_soon(event: &ScheduleEvent, minutes_until: u32) -> Self {
        let message = format!(
            "You have {} {} starting at {} in {} minutes",
            event.module,
            event.kind,
            clock::display_clock(&event.start_time),
            minutes_until
        );
        Self {
            kind: SuggestionKind::Class,
            message,
            data: Some(SuggestionData::ClassSoon {
                event: event.clone(),
                minutes_until,
            }),
        }
    }

    fn class_tomorrow(event: &ScheduleEvent) -> Self {
        let message = format!(
            "You have {} {} tomorrow at {}",
            event.module,
            event.kind,
            clock::display_clock(&event.start_time)
        );
        Self {
            kind: SuggestionKind::Class,
            message,
            data: Some(SuggestionData::ClassTomorrow {
                event: event.clone(),
                days_until: 1,
            }),
        }
    }

    fn idle() -> Self {
        Self {
            kind: SuggestionKind::Idle,
            message: IDLE_MESSAGE.to_string(),
            data: None,
        }
    }
}

/// Best suggestion under the default policy.
pub fn right_now(tasks: &[Task], events: &[ScheduleEvent], now: NaiveDateTime) -> RightNow {
    right_now_with_policy(tasks, events, now, &AdvisorPolicy::default())
}

pub fn right_now_with_policy(
    tasks: &[Task],
    events: &[ScheduleEvent],
    now: NaiveDateTime,
    policy: &AdvisorPolicy,
) -> RightNow {
    if let Some(ranked) = most_urgent(tasks, now) {
        return RightNow::task(ranked);
    }
    class_suggestion(events, now, policy).unwrap_or_else(RightNow::idle)
}

fn class_suggestion(
    events: &[ScheduleEvent],
    now: NaiveDateTime,
    policy: &AdvisorPolicy,
) -> Option<RightNow> {
    let today = clock::weekday_of(&now);
    let tomorrow = (today + 1) % DAYS_PER_WEEK;
    let current = clock::minutes_of_day(&now);

    let timed: Vec<(&ScheduleEvent, u8, u32)> = timetable_order(events)
        .into_iter()
        .filter_map(|e| Some((e, e.weekday()?, e.start().minutes()?)))
        .collect();

    let soon = timed.iter().find(|&&(_, day, start)| {
        day == today && start >= current && start - current <= policy.class_soon_minutes
    });
    if let Some(&(event, _, start)) = soon {
        return Some(RightNow::class_soon(event, start - current));
    }

    timed
        .iter()
        .find(|&&(_, day, start)| day == tomorrow && start <= policy.tomorrow_cutoff)
        .map(|&(event, _, _)| RightNow::class_tomorrow(event))
}
