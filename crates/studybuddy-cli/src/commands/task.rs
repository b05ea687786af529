//! Study task commands.

use std::path::PathBuf;

use clap::Subcommand;
use studybuddy_core::{StudyDb, Task};

use super::print_json;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task title
        title: String,
        /// Course code, e.g. CS2040
        #[arg(long)]
        course: String,
        /// Due time, RFC 3339 or "YYYY-MM-DDTHH:MM:SS"
        #[arg(long)]
        due: String,
        /// Link to the assignment page
        #[arg(long)]
        link: Option<String>,
    },
    /// List tasks, nearest due first
    List {
        /// Maximum number of tasks
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one task
    Get {
        /// Task ID
        id: i64,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: i64,
    },
    /// Replace all tasks with the JSON array in a file
    Import {
        /// Path to a JSON file of tasks
        file: PathBuf,
    },
}

pub fn run(user: &str, action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = StudyDb::open()?;

    match action {
        TaskAction::Add {
            title,
            course,
            due,
            link,
        } => {
            let mut task = Task::new(title, course, due).with_user(user);
            task.link = link;
            let id = db.insert_task(&task)?;
            let stored = db.get_task(user, id)?.ok_or("task vanished after insert")?;
            print_json(&stored)?;
        }
        TaskAction::List { limit } => {
            print_json(&db.list_tasks(user, limit)?)?;
        }
        TaskAction::Get { id } => {
            let task = db
                .get_task(user, id)?
                .ok_or_else(|| format!("task not found: {id}"))?;
            print_json(&task)?;
        }
        TaskAction::Delete { id } => {
            if !db.delete_task(user, id)? {
                return Err(format!("task not found: {id}").into());
            }
            println!("Task deleted: {id}");
        }
        TaskAction::Import { file } => {
            let raw = std::fs::read_to_string(&file)?;
            let tasks: Vec<Task> = serde_json::from_str(&raw)?;
            let count = db.replace_tasks(user, &tasks)?;
            println!("Imported {count} tasks");
        }
    }
    Ok(())
}
