//! Integration tests for the widget responses.
//!
//! Records go through the SQLite store first, the way the CLI feeds them,
//! and the JSON shapes are checked field by field.

use chrono::NaiveDateTime;
use serde_json::json;
use studybuddy_core::storage::Config;
use studybuddy_core::{
    format_context, right_now_with_policy, schedule_summary, ScheduleEvent, StudyDb, Task,
};

// 2024-03-11 is a Monday.
fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

fn timetable(db: &mut StudyDb) {
    let events = vec![
        ScheduleEvent::new("CS2040", "Lecture", "Monday", "1000", "1200").with_venue("LT19"),
        ScheduleEvent::new("MA1521", "Tutorial", "Monday", "1100", "1300").with_venue("S17"),
        ScheduleEvent::new("GEA1000", "Lecture", "Tuesday", "0900", "1000"),
        ScheduleEvent::new("CS1231", "Lab", "Funday", "0800", "0900"),
    ];
    db.replace_events("u1", &events).unwrap();
}

#[test]
fn test_schedule_widget_reports_clash_and_next_class() {
    let mut db = StudyDb::open_memory().unwrap();
    timetable(&mut db);

    let events = db.list_events("u1", None).unwrap();
    let summary = schedule_summary(&events, at("2024-03-11 10:30"));
    let value = serde_json::to_value(&summary).unwrap();

    assert_eq!(value["hasClash"], json!(true));
    assert_eq!(value["clashes"].as_array().unwrap().len(), 1);
    assert_eq!(
        value["clashes"][0]["conflict"],
        json!("Overlapping time slots on Monday: 1000-1200 and 1100-1300")
    );
    assert_eq!(value["clashes"][0]["event1"]["module"], json!("CS2040"));
    assert_eq!(value["nextClass"]["event"]["module"], json!("MA1521"));
    assert_eq!(value["timeUntilNext"], json!("30 minutes"));
    assert_eq!(
        value["nextClass"]["formatted"],
        json!("Your next class is MA1521 Tutorial at 11:00 in S17 starting in 30 minutes")
    );
}

#[test]
fn test_schedule_widget_wraps_to_next_week() {
    let mut db = StudyDb::open_memory().unwrap();
    timetable(&mut db);

    let events = db.list_events("u1", None).unwrap();
    // Saturday: nothing left this week, Monday 10:00 is 1 day 22 hours away.
    let summary = schedule_summary(&events, at("2024-03-16 12:00"));
    assert_eq!(summary.time_until_next.as_deref(), Some("1 days 22 hours"));
    assert_eq!(summary.next_class.unwrap().event.module, "CS2040");
}

#[test]
fn test_empty_store_gives_null_fields() {
    let db = StudyDb::open_memory().unwrap();
    let events = db.list_events("nobody", None).unwrap();
    let value = serde_json::to_value(schedule_summary(&events, at("2024-03-11 09:00"))).unwrap();
    assert_eq!(
        value,
        json!({ "hasClash": false, "clashes": [], "nextClass": null, "timeUntilNext": null })
    );
}

#[test]
fn test_right_now_prefers_deadline_over_class() {
    let mut db = StudyDb::open_memory().unwrap();
    timetable(&mut db);
    db.replace_tasks(
        "u1",
        &[
            Task::new("Past", "CS2040", "2024-03-10T09:00:00"),
            Task::new("Problem Set", "MA1521", "2024-03-12T09:00:00+08:00"),
        ],
    )
    .unwrap();

    let tasks = db.list_tasks("u1", None).unwrap();
    let events = db.list_events("u1", None).unwrap();
    let policy = Config::default().advisor.policy();
    let value =
        serde_json::to_value(right_now_with_policy(&tasks, &events, at("2024-03-11 09:30"), &policy))
            .unwrap();

    assert_eq!(value["type"], json!("TASK"));
    assert_eq!(value["data"]["urgency"], json!("URGENT"));
    assert_eq!(value["data"]["hoursUntil"], json!(15.5));
    assert_eq!(value["data"]["task"]["title"], json!("Problem Set"));
}

#[test]
fn test_right_now_suggests_class_then_idle() {
    let mut db = StudyDb::open_memory().unwrap();
    timetable(&mut db);
    let events = db.list_events("u1", None).unwrap();
    let policy = Config::default().advisor.policy();

    let soon = serde_json::to_value(right_now_with_policy(&[], &events, at("2024-03-11 09:15"), &policy))
        .unwrap();
    assert_eq!(soon["type"], json!("CLASS"));
    assert_eq!(soon["message"], json!("You have CS2040 Lecture starting at 10:00 in 45 minutes"));
    assert_eq!(soon["data"]["minutesUntil"], json!(45));

    let tomorrow = right_now_with_policy(&[], &events, at("2024-03-11 20:00"), &policy);
    assert_eq!(tomorrow.message, "You have GEA1000 Lecture tomorrow at 09:00");

    let idle = serde_json::to_value(right_now_with_policy(&[], &events, at("2024-03-12 12:00"), &policy))
        .unwrap();
    assert_eq!(
        idle,
        json!({ "type": "IDLE", "message": "No urgent tasks. You can work ahead!", "data": null })
    );
}

#[test]
fn test_context_lists_unknown_days_last() {
    let mut db = StudyDb::open_memory().unwrap();
    timetable(&mut db);
    let events = db.list_events("u1", None).unwrap();

    let text = format_context(&[], &events, at("2024-03-11 09:00"));
    let monday = text.find("Monday:").unwrap();
    let tuesday = text.find("Tuesday:").unwrap();
    let funday = text.find("Funday:").unwrap();
    assert!(monday < tuesday && tuesday < funday);
    assert!(text.contains("- No tasks found."));
    assert!(text.contains("  - GEA1000 (Lecture) | 09:00-10:00 | Venue: N/A"));
}
