pub mod ask;
pub mod auth;
pub mod config;
pub mod context;
pub mod event;
pub mod intent;
pub mod task;
pub mod widget;

use chrono::NaiveDateTime;
use serde::Serialize;
use studybuddy_core::clock;

/// `--now` if given, else the current UTC wall clock.
///
/// Due dates with an offset are folded to UTC when parsed, so the default
/// clock must be UTC too.
pub fn resolve_now(now: Option<&str>) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    match now {
        Some(s) => clock::parse_instant(s).ok_or_else(|| format!("invalid --now value: {s}").into()),
        None => Ok(chrono::Utc::now().naive_utc()),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
