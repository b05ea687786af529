//! Grounding text for the chat model.
//!
//! Renders the user's tasks and timetable as plain text so the model can only
//! answer from known facts. Layout:
//!
//! ```text
//! Current Time: 2024-03-11 12:00:00 UTC
//!
//! === USER'S STUDY TASKS ===
//! - Task: HW1 | Course: CS101 | Due: 2024-03-12T23:59:00 | Link: N/A
//!
//! === USER'S CLASS SCHEDULE ===
//!
//! Monday:
//!   - CS2040 (Lecture) | 10:00-12:00 | Venue: LT19
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::clock;
use crate::model::{ScheduleEvent, Task};

const TASKS_HEADER: &str = "=== USER'S STUDY TASKS ===";
const SCHEDULE_HEADER: &str = "=== USER'S CLASS SCHEDULE ===";
const NOT_AVAILABLE: &str = "N/A";

pub fn format_context(tasks: &[Task], events: &[ScheduleEvent], now: NaiveDateTime) -> String {
    let mut lines = vec![
        format!("Current Time: {} UTC", now.format("%Y-%m-%d %H:%M:%S")),
        String::new(),
    ];

    lines.push(TASKS_HEADER.to_string());
    push_tasks(&mut lines, tasks);
    lines.push(String::new());

    lines.push(SCHEDULE_HEADER.to_string());
    push_schedule(&mut lines, events);

    lines.join("\n")
}

fn push_tasks(lines: &mut Vec<String>, tasks: &[Task]) {
    if tasks.is_empty() {
        lines.push("- No tasks found.".to_string());
        return;
    }

    // Unparsable due dates sort after every real one.
    let mut ordered: Vec<(&Task, Option<NaiveDateTime>)> =
        tasks.iter().map(|t| (t, t.due_instant())).collect();
    ordered.sort_by_key(|(_, due)| (due.is_none(), *due));

    for (task, _) in ordered {
        lines.push(format!(
            "- Task: {} | Course: {} | Due: {} | Link: {}",
            task.title,
            task.course,
            task.due_at,
            task.link.as_deref().filter(|l| !l.is_empty()).unwrap_or(NOT_AVAILABLE)
        ));
    }
}

fn push_schedule(lines: &mut Vec<String>, events: &[ScheduleEvent]) {
    if events.is_empty() {
        lines.push("- No schedule events found.".to_string());
        return;
    }

    let mut by_day: BTreeMap<(u8, &str), Vec<&ScheduleEvent>> = BTreeMap::new();
    for event in events {
        by_day
            .entry((clock::weekday_index(&event.day), event.day.as_str()))
            .or_default()
            .push(event);
    }

    for ((index, day), mut day_events) in by_day {
        day_events.sort_by_key(|e| e.start().or_sentinel());
        let heading = clock::weekday_name(index).unwrap_or(day);

        lines.push(String::new());
        lines.push(format!("{heading}:"));
        for event in day_events {
            lines.push(format!(
                "  - {} ({}) | {}-{} | Venue: {}",
                event.module,
                event.kind,
                clock::display_clock(&event.start_time),
                clock::display_clock(&event.end_time),
                event.venue_or(NOT_AVAILABLE)
            ));
        }
    }
}
