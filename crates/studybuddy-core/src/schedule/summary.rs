use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::clash::{detect_clashes, Clash};
use super::next_class::{find_next_class, NextClassInfo};
use crate::model::ScheduleEvent;

/// Schedule widget payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    pub has_clash: bool,
    pub clashes: Vec<Clash>,
    pub next_class: Option<NextClassInfo>,
    pub time_until_next: Option<String>,
}

pub fn schedule_summary(events: &[ScheduleEvent], now: NaiveDateTime) -> ScheduleSummary {
    let clashes = detect_clashes(events);
    let next_class = find_next_class(events, now);
    ScheduleSummary {
        has_clash: !clashes.is_empty(),
        time_until_next: next_class.as_ref().map(|n| n.time_until.clone()),
        clashes,
        next_class,
    }
}
