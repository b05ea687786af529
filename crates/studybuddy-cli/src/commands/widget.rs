use clap::Subcommand;
use studybuddy_core::{right_now_with_policy, schedule_summary, Config, StudyDb};

use super::{print_json, resolve_now};

#[derive(Subcommand)]
pub enum WidgetAction {
    /// What to do right now
    RightNow {
        /// Current time (defaults to now, UTC)
        #[arg(long)]
        now: Option<String>,
    },
    /// Timetable clashes and the next class
    Schedule {
        /// Current time (defaults to now, UTC)
        #[arg(long)]
        now: Option<String>,
    },
}

pub fn run(user: &str, action: WidgetAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = StudyDb::open()?;

    match action {
        WidgetAction::RightNow { now } => {
            let now = resolve_now(now.as_deref())?;
            let policy = Config::load_or_default().advisor.policy();
            let tasks = db.list_tasks(user, None)?;
            let events = db.list_events(user, None)?;
            print_json(&right_now_with_policy(&tasks, &events, now, &policy))?;
        }
        WidgetAction::Schedule { now } => {
            let now = resolve_now(now.as_deref())?;
            let events = db.list_events(user, None)?;
            print_json(&schedule_summary(&events, now))?;
        }
    }
    Ok(())
}
