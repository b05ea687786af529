//! Stored records: study tasks and weekly timetable events.
//!
//! Both are written by ingestion and only read by the planning code. Field
//! names on the wire are camelCase (`dueAt`, `startTime`, `userId`, ...).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::clock::{self, ParsedClock, UNKNOWN_WEEKDAY};

/// A deadline-bearing work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub course: String,
    /// ISO-8601-like instant; see [`clock::parse_instant`].
    pub due_at: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Task {
    pub fn new(title: impl Into<String>, course: impl Into<String>, due_at: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            course: course.into(),
            due_at: due_at.into(),
            link: None,
            user_id: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Parsed due instant, `None` when the stored string is malformed.
    pub fn due_instant(&self) -> Option<NaiveDateTime> {
        clock::parse_instant(&self.due_at)
    }
}

/// A weekly-recurring class. One record stands for every week's occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEvent {
    #[serde(default)]
    pub id: i64,
    pub module: String,
    /// Lecture, tutorial, lab... free text.
    #[serde(rename = "type")]
    pub kind: String,
    /// Canonical English weekday name.
    pub day: String,
    /// `HHMM`
    pub start_time: String,
    /// `HHMM`
    pub end_time: String,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ScheduleEvent {
    pub fn new(
        module: impl Into<String>,
        kind: impl Into<String>,
        day: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            module: module.into(),
            kind: kind.into(),
            day: day.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            venue: None,
            user_id: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Canonical weekday index, `None` for unknown day names.
    pub fn weekday(&self) -> Option<u8> {
        match clock::weekday_index(&self.day) {
            UNKNOWN_WEEKDAY => None,
            idx => Some(idx),
        }
    }

    pub fn start(&self) -> ParsedClock {
        ParsedClock::parse(&self.start_time)
    }

    pub fn end(&self) -> ParsedClock {
        ParsedClock::parse(&self.end_time)
    }

    /// Half-open `[start, end)` in minutes since midnight.
    ///
    /// `None` when either clock is malformed or the interval is empty
    /// (`end <= start`).
    pub fn interval(&self) -> Option<(u32, u32)> {
        let start = self.start().minutes()?;
        let end = self.end().minutes()?;
        (start < end).then_some((start, end))
    }

    /// Sort key for timetable order: weekday (unknown last), then start.
    pub fn timetable_key(&self) -> (u8, u32) {
        (clock::weekday_index(&self.day), self.start().or_sentinel())
    }

    pub fn venue_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.venue.as_deref().filter(|v| !v.is_empty()).unwrap_or(fallback)
    }
}

/// Events sorted by weekday then start time, stable for ties.
pub fn timetable_order(events: &[ScheduleEvent]) -> Vec<&ScheduleEvent> {
    let mut ordered: Vec<&ScheduleEvent> = events.iter().collect();
    ordered.sort_by_key(|e| e.timetable_key());
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_uses_camel_case_keys() {
        let task = Task::new("HW1", "CS101", "2024-03-15T10:00:00").with_user("u1");
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["dueAt"], "2024-03-15T10:00:00");
        assert_eq!(json["userId"], "u1");
        assert!(json.get("due_at").is_none());
    }

    #[test]
    fn event_serializes_kind_as_type() {
        let event = ScheduleEvent::new("CS2040", "Lecture", "Monday", "1000", "1200");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Lecture");
        assert_eq!(json["startTime"], "1000");
        assert_eq!(json["endTime"], "1200");
        assert_eq!(json["venue"], serde_json::Value::Null);
    }

    #[test]
    fn ingested_json_without_bookkeeping_fields_deserializes() {
        let event: ScheduleEvent = serde_json::from_str(
            r#"{"module":"MA1521","type":"Tutorial","day":"Friday","startTime":"0900","endTime":"1000"}"#,
        )
        .unwrap();
        assert_eq!(event.weekday(), Some(4));
        assert_eq!(event.id, 0);
        assert!(event.venue.is_none());
    }

    #[test]
    fn interval_is_empty_for_malformed_or_inverted_times() {
        assert_eq!(
            ScheduleEvent::new("A", "L", "Monday", "0900", "1000").interval(),
            Some((540, 600))
        );
        assert_eq!(ScheduleEvent::new("A", "L", "Monday", "1000", "0900").interval(), None);
        assert_eq!(ScheduleEvent::new("A", "L", "Monday", "1000", "1000").interval(), None);
        assert_eq!(ScheduleEvent::new("A", "L", "Monday", "10:00", "1100").interval(), None);
    }

    #[test]
    fn timetable_order_puts_unknown_days_last() {
        let events = vec![
            ScheduleEvent::new("C", "L", "Someday", "0800", "0900"),
            ScheduleEvent::new("B", "L", "Tuesday", "0800", "0900"),
            ScheduleEvent::new("A", "L", "Monday", "1400", "1500"),
            ScheduleEvent::new("D", "L", "Monday", "0900", "1000"),
        ];
        let modules: Vec<&str> = timetable_order(&events).iter().map(|e| e.module.as_str()).collect();
        assert_eq!(modules, ["D", "A", "B", "C"]);
    }

    #[test]
    fn blank_venue_falls_back() {
        let event = ScheduleEvent::new("A", "L", "Monday", "0900", "1000").with_venue("");
        assert_eq!(event.venue_or("TBA"), "TBA");
        let event = event.with_venue("COM1-0204");
        assert_eq!(event.venue_or("TBA"), "COM1-0204");
    }
}
