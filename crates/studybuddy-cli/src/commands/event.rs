//! Timetable event commands.

use std::path::PathBuf;

use clap::Subcommand;
use studybuddy_core::{ScheduleEvent, StudyDb};

use super::print_json;

#[derive(Subcommand)]
pub enum EventAction {
    /// Add a weekly class
    Add {
        /// Module code, e.g. CS2040
        module: String,
        /// Weekday name, e.g. Monday
        #[arg(long)]
        day: String,
        /// Start time as HHMM
        #[arg(long)]
        start: String,
        /// End time as HHMM
        #[arg(long)]
        end: String,
        /// Class type
        #[arg(long = "type", default_value = "Lecture")]
        kind: String,
        /// Room or location
        #[arg(long)]
        venue: Option<String>,
    },
    /// List events in timetable order
    List {
        /// Only this weekday
        #[arg(long)]
        day: Option<String>,
    },
    /// Show one event
    Get {
        /// Event ID
        id: i64,
    },
    /// Delete an event
    Delete {
        /// Event ID
        id: i64,
    },
    /// Replace the whole timetable with the JSON array in a file
    Import {
        /// Path to a JSON file of events
        file: PathBuf,
    },
}

pub fn run(user: &str, action: EventAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = StudyDb::open()?;

    match action {
        EventAction::Add {
            module,
            day,
            start,
            end,
            kind,
            venue,
        } => {
            let mut event = ScheduleEvent::new(module, kind, day, start, end).with_user(user);
            event.venue = venue;
            let id = db.insert_event(&event)?;
            let stored = db.get_event(user, id)?.ok_or("event vanished after insert")?;
            print_json(&stored)?;
        }
        EventAction::List { day } => {
            print_json(&db.list_events(user, day.as_deref())?)?;
        }
        EventAction::Get { id } => {
            let event = db
                .get_event(user, id)?
                .ok_or_else(|| format!("event not found: {id}"))?;
            print_json(&event)?;
        }
        EventAction::Delete { id } => {
            if !db.delete_event(user, id)? {
                return Err(format!("event not found: {id}").into());
            }
            println!("Event deleted: {id}");
        }
        EventAction::Import { file } => {
            let raw = std::fs::read_to_string(&file)?;
            let events: Vec<ScheduleEvent> = serde_json::from_str(&raw)?;
            let count = db.replace_events(user, &events)?;
            println!("Imported {count} events");
        }
    }
    Ok(())
}
