//! Deadline urgency: pick the nearest future task and classify it.
//!
//! Tiers are fixed thresholds on hours remaining, each an exclusive upper
//! bound:
//!
//! | hours until due | tier     |
//! |-----------------|----------|
//! | `< 2`           | CRITICAL |
//! | `< 24`          | URGENT   |
//! | `< 48`          | HIGH     |
//! | otherwise       | NORMAL   |

use std::fmt;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::model::Task;

const CRITICAL_BELOW_HOURS: f64 = 2.0;
const URGENT_BELOW_HOURS: f64 = 24.0;
const HIGH_BELOW_HOURS: f64 = 48.0;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Coarse urgency of a deadline, most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UrgencyTier {
    Critical,
    Urgent,
    High,
    Normal,
}

impl UrgencyTier {
    pub fn from_hours(hours: f64) -> Self {
        if hours < CRITICAL_BELOW_HOURS {
            UrgencyTier::Critical
        } else if hours < URGENT_BELOW_HOURS {
            UrgencyTier::Urgent
        } else if hours < HIGH_BELOW_HOURS {
            UrgencyTier::High
        } else {
            UrgencyTier::Normal
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UrgencyTier::Critical => "CRITICAL",
            UrgencyTier::Urgent => "URGENT",
            UrgencyTier::High => "HIGH",
            UrgencyTier::Normal => "NORMAL",
        }
    }
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The nearest future task with its urgency.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTask {
    pub task: Task,
    pub due: NaiveDateTime,
    pub hours_until: f64,
    pub tier: UrgencyTier,
    /// e.g. `"45 minutes"`, `"5 hours"`, `"3 days"`
    pub time_until: String,
}

/// Nearest task due at or after `now`.
///
/// Tasks with an unparsable due instant are skipped. Ties keep the first
/// task in input order.
pub fn most_urgent(tasks: &[Task], now: NaiveDateTime) -> Option<RankedTask> {
    let (task, due) = tasks
        .iter()
        .filter_map(|task| match task.due_instant() {
            Some(due) => Some((task, due)),
            None => {
                tracing::debug!(task_id = task.id, due_at = %task.due_at, "skipping task with unparsable due date");
                None
            }
        })
        .filter(|(_, due)| *due >= now)
        .min_by_key(|(_, due)| *due)?;

    let remaining = due - now;
    let hours_until = remaining.num_milliseconds() as f64 / MILLIS_PER_HOUR;

    Some(RankedTask {
        task: task.clone(),
        due,
        hours_until,
        tier: UrgencyTier::from_hours(hours_until),
        time_until: format_due_in(remaining),
    })
}

/// Remaining time in the coarsest fitting unit, truncated.
pub fn format_due_in(remaining: TimeDelta) -> String {
    let hours = remaining.num_milliseconds() as f64 / MILLIS_PER_HOUR;
    if hours < 1.0 {
        format!("{} minutes", remaining.num_minutes())
    } else if hours < URGENT_BELOW_HOURS {
        format!("{} hours", remaining.num_hours())
    } else {
        format!("{} days", remaining.num_days())
    }
}
