use studybuddy_core::{format_context, StudyDb};

use super::resolve_now;

pub fn run(user: &str, now: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let now = resolve_now(now)?;
    let db = StudyDb::open()?;
    let tasks = db.list_tasks(user, None)?;
    let events = db.list_events(user, None)?;
    println!("{}", format_context(&tasks, &events, now));
    Ok(())
}
