//! SQLite-based record store for tasks and timetable events.
//!
//! Ingestion writes here; the planning code only ever receives the lists it
//! reads back. Every query is scoped to one user.

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use super::{data_dir, migrations, Config};
use crate::error::{DatabaseError, Result, ValidationError};
use crate::model::{ScheduleEvent, Task};

const TASK_COLUMNS: &str = "id, title, course, due_at, link, user_id, created_at, updated_at";
const EVENT_COLUMNS: &str =
    "id, module, type, day, start_time, end_time, venue, user_id, created_at, updated_at";

/// Canonical weekday order for SQL sorting; unknown names go last.
const DAY_ORDER_SQL: &str = "CASE day
    WHEN 'Monday' THEN 0 WHEN 'Tuesday' THEN 1 WHEN 'Wednesday' THEN 2
    WHEN 'Thursday' THEN 3 WHEN 'Friday' THEN 4 WHEN 'Saturday' THEN 5
    WHEN 'Sunday' THEN 6 ELSE 99 END";

/// Number of stored records for a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCounts {
    pub tasks: u64,
    pub events: u64,
}

/// SQLite database holding study tasks and schedule events.
pub struct StudyDb {
    conn: Connection,
}

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        course: row.get(2)?,
        due_at: row.get(3)?,
        link: row.get(4)?,
        user_id: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn row_to_event(row: &Row<'_>) -> rusqlite::Result<ScheduleEvent> {
    Ok(ScheduleEvent {
        id: row.get(0)?,
        module: row.get(1)?,
        kind: row.get(2)?,
        day: row.get(3)?,
        start_time: row.get(4)?,
        end_time: row.get(5)?,
        venue: row.get(6)?,
        user_id: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Empty(field.to_string()))
    } else {
        Ok(())
    }
}

fn insert_task_in(conn: &Connection, task: &Task, user_id: &str) -> Result<i64> {
    require("title", &task.title)?;
    require("course", &task.course)?;
    require("userId", user_id)?;

    let now = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO study_tasks (title, course, due_at, link, user_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            task.title,
            task.course,
            task.due_at,
            task.link,
            user_id,
            task.created_at.as_deref().unwrap_or(&now),
            now,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn insert_event_in(conn: &Connection, event: &ScheduleEvent, user_id: &str) -> Result<i64> {
    require("module", &event.module)?;
    require("day", &event.day)?;
    require("userId", user_id)?;

    let now = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO schedule_events (module, type, day, start_time, end_time, venue, user_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            event.module,
            event.kind,
            event.day,
            event.start_time,
            event.end_time,
            event.venue,
            user_id,
            event.created_at.as_deref().unwrap_or(&now),
            now,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

impl StudyDb {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database configured in `config.toml`, inside the data directory.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let config = Config::load_or_default();
        let path = config.storage.database_path(&data_dir()?);
        Self::open_at(&path)
    }

    /// Open (creating if needed) the database at `path`.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened study database");
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Store a task for `task.user_id`. Returns the new row id.
    ///
    /// # Errors
    /// Returns a validation error for an empty title, course or user id.
    pub fn insert_task(&self, task: &Task) -> Result<i64> {
        insert_task_in(&self.conn, task, &task.user_id)
    }

    /// Store an event for `event.user_id`. Returns the new row id.
    ///
    /// Clock strings and day names are stored as given.
    pub fn insert_event(&self, event: &ScheduleEvent) -> Result<i64> {
        insert_event_in(&self.conn, event, &event.user_id)
    }

    pub fn get_task(&self, user_id: &str, id: i64) -> Result<Option<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM study_tasks WHERE user_id = ?1 AND id = ?2");
        Ok(self
            .conn
            .query_row(&sql, params![user_id, id], row_to_task)
            .optional()?)
    }

    pub fn get_event(&self, user_id: &str, id: i64) -> Result<Option<ScheduleEvent>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM schedule_events WHERE user_id = ?1 AND id = ?2");
        Ok(self
            .conn
            .query_row(&sql, params![user_id, id], row_to_event)
            .optional()?)
    }

    /// A user's tasks ordered by stored due string, at most `limit` of them.
    pub fn list_tasks(&self, user_id: &str, limit: Option<u32>) -> Result<Vec<Task>> {
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM study_tasks
             WHERE user_id = ?1
             ORDER BY due_at ASC, id ASC
             LIMIT ?2"
        );
        // SQLite treats a negative LIMIT as unbounded.
        let limit = limit.map_or(-1, i64::from);
        let mut stmt = self.conn.prepare(&sql)?;
        let tasks = stmt
            .query_map(params![user_id, limit], row_to_task)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    /// A user's events in timetable order, optionally for one weekday.
    pub fn list_events(&self, user_id: &str, day: Option<&str>) -> Result<Vec<ScheduleEvent>> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM schedule_events
             WHERE user_id = ?1 AND (?2 IS NULL OR day = ?2)
             ORDER BY {DAY_ORDER_SQL}, start_time ASC, id ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let events = stmt
            .query_map(params![user_id, day], row_to_event)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(events)
    }

    /// Returns whether a row was removed.
    pub fn delete_task(&self, user_id: &str, id: i64) -> Result<bool> {
        let n = self.conn.execute(
            "DELETE FROM study_tasks WHERE user_id = ?1 AND id = ?2",
            params![user_id, id],
        )?;
        Ok(n > 0)
    }

    /// Returns whether a row was removed.
    pub fn delete_event(&self, user_id: &str, id: i64) -> Result<bool> {
        let n = self.conn.execute(
            "DELETE FROM schedule_events WHERE user_id = ?1 AND id = ?2",
            params![user_id, id],
        )?;
        Ok(n > 0)
    }

    /// Replace all of a user's tasks in one transaction.
    ///
    /// The records' own `userId` is ignored; everything is filed under
    /// `user_id`. Nothing changes if any record fails validation.
    pub fn replace_tasks(&mut self, user_id: &str, tasks: &[Task]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM study_tasks WHERE user_id = ?1", params![user_id])?;
        for task in tasks {
            insert_task_in(&tx, task, user_id)?;
        }
        tx.commit()?;
        tracing::info!(user_id, count = tasks.len(), "replaced study tasks");
        Ok(tasks.len())
    }

    /// Replace all of a user's events in one transaction.
    pub fn replace_events(&mut self, user_id: &str, events: &[ScheduleEvent]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM schedule_events WHERE user_id = ?1", params![user_id])?;
        for event in events {
            insert_event_in(&tx, event, user_id)?;
        }
        tx.commit()?;
        tracing::info!(user_id, count = events.len(), "replaced schedule events");
        Ok(events.len())
    }

    pub fn counts(&self, user_id: &str) -> Result<RecordCounts> {
        let count = |table: &str| -> rusqlite::Result<u64> {
            self.conn.query_row(
                &format!("SELECT COUNT(*) FROM {table} WHERE user_id = ?1"),
                params![user_id],
                |row| row.get(0),
            )
        };
        Ok(RecordCounts {
            tasks: count("study_tasks")?,
            events: count("schedule_events")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn db() -> StudyDb {
        StudyDb::open_memory().unwrap()
    }

    #[test]
    fn insert_and_list_tasks_by_due() {
        let db = db();
        db.insert_task(&Task::new("Later", "CS101", "2024-03-20T10:00:00").with_user("u1"))
            .unwrap();
        db.insert_task(&Task::new("Sooner", "CS101", "2024-03-12T10:00:00").with_user("u1"))
            .unwrap();
        db.insert_task(&Task::new("Other", "CS101", "2024-03-01T10:00:00").with_user("u2"))
            .unwrap();

        let tasks = db.list_tasks("u1", None).unwrap();
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Sooner", "Later"]);
        assert!(tasks[0].created_at.is_some());
        assert_eq!(db.list_tasks("u1", Some(1)).unwrap().len(), 1);
    }

    #[test]
    fn events_come_back_in_timetable_order() {
        let db = db();
        for (module, day, start) in [
            ("FRI", "Friday", "0900"),
            ("MON-LATE", "Monday", "1400"),
            ("ODD", "Flexible", "0800"),
            ("MON-EARLY", "Monday", "0800"),
            ("WED", "Wednesday", "1000"),
        ] {
            db.insert_event(&ScheduleEvent::new(module, "Lecture", day, start, "2300").with_user("u1"))
                .unwrap();
        }
        let modules: Vec<String> = db
            .list_events("u1", None)
            .unwrap()
            .into_iter()
            .map(|e| e.module)
            .collect();
        assert_eq!(modules, ["MON-EARLY", "MON-LATE", "WED", "FRI", "ODD"]);

        let monday = db.list_events("u1", Some("Monday")).unwrap();
        assert_eq!(monday.len(), 2);
    }

    #[test]
    fn lookups_and_deletes_are_user_scoped() {
        let db = db();
        let id = db
            .insert_event(&ScheduleEvent::new("CS2040", "Lab", "Monday", "1000", "1200").with_user("u1"))
            .unwrap();
        assert!(db.get_event("u2", id).unwrap().is_none());
        assert_eq!(db.get_event("u1", id).unwrap().unwrap().kind, "Lab");
        assert!(!db.delete_event("u2", id).unwrap());
        assert!(db.delete_event("u1", id).unwrap());
        assert!(db.get_event("u1", id).unwrap().is_none());
    }

    #[test]
    fn empty_title_is_rejected() {
        let db = db();
        let err = db.insert_task(&Task::new(" ", "CS101", "2024-03-12").with_user("u1"));
        assert!(matches!(err, Err(CoreError::Validation(ValidationError::Empty(_)))));
    }

    #[test]
    fn malformed_times_are_stored_verbatim() {
        let db = db();
        let id = db
            .insert_task(&Task::new("HW", "CS101", "whenever").with_user("u1"))
            .unwrap();
        assert_eq!(db.get_task("u1", id).unwrap().unwrap().due_at, "whenever");
    }

    #[test]
    fn replace_swaps_a_users_records_atomically() {
        let mut db = db();
        db.insert_task(&Task::new("Old", "CS101", "2024-03-12").with_user("u1"))
            .unwrap();
        db.insert_task(&Task::new("Keep", "CS101", "2024-03-12").with_user("u2"))
            .unwrap();

        let fresh = vec![
            Task::new("New1", "CS101", "2024-03-13"),
            Task::new("New2", "CS102", "2024-03-14").with_user("ignored"),
        ];
        assert_eq!(db.replace_tasks("u1", &fresh).unwrap(), 2);
        let titles: Vec<String> = db.list_tasks("u1", None).unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["New1", "New2"]);
        assert_eq!(db.counts("u2").unwrap().tasks, 1);

        let broken = vec![Task::new("Fine", "CS101", "2024-03-13"), Task::new("", "CS101", "2024-03-13")];
        assert!(db.replace_tasks("u1", &broken).is_err());
        assert_eq!(db.counts("u1").unwrap().tasks, 2);
    }

    #[test]
    fn counts_cover_both_tables() {
        let mut db = db();
        db.replace_events(
            "u1",
            &[ScheduleEvent::new("A", "Lecture", "Monday", "0900", "1000")],
        )
        .unwrap();
        assert_eq!(db.counts("u1").unwrap(), RecordCounts { tasks: 0, events: 1 });
    }

    #[test]
    fn open_at_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("study.db");
        {
            let db = StudyDb::open_at(&path).unwrap();
            db.insert_task(&Task::new("HW", "CS101", "2024-03-12").with_user("u1"))
                .unwrap();
        }
        let reopened = StudyDb::open_at(&path).unwrap();
        assert_eq!(reopened.counts("u1").unwrap().tasks, 1);
    }
}
