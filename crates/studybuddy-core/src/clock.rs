//! Clock strings, weekday names and instants.
//!
//! Timetable records store `HHMM` clock strings and English weekday names;
//! tasks store their due instant as an ISO-8601-like string. This module turns
//! those into comparable integers and `NaiveDateTime`s.
//!
//! Malformed input never errors. Internally a clock string parses to
//! [`ParsedClock`]; the legacy boundary ([`parse_clock`]) collapses
//! `Invalid` to the sentinel `0`, and [`weekday_index`] answers
//! [`UNKNOWN_WEEKDAY`] for names outside the canonical table.
//!
//! All instants live on one abstract clock: offsets are folded away and no
//! timezone conversion happens here.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

pub const MINUTES_PER_HOUR: u32 = 60;
pub const MINUTES_PER_DAY: i64 = 24 * 60;
pub const DAYS_PER_WEEK: u8 = 7;

/// Sentinel index for weekday names outside [`WEEKDAYS`].
pub const UNKNOWN_WEEKDAY: u8 = 99;

/// Canonical weekday order, Monday first. Every weekday comparison in the
/// crate goes through this table.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Accepted naive layouts for due instants, tried in order.
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Result of reading a 4-digit 24-hour clock string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsedClock {
    /// Minutes since midnight, `0..1440`.
    Valid(u32),
    Invalid,
}

impl ParsedClock {
    /// Parse `HHMM`. Anything other than exactly four ASCII digits forming
    /// `00..=23` hours and `00..=59` minutes is `Invalid`.
    pub fn parse(s: &str) -> Self {
        let bytes = s.as_bytes();
        if bytes.len() != 4 || !bytes.iter().all(u8::is_ascii_digit) {
            return ParsedClock::Invalid;
        }
        let digit = |i: usize| u32::from(bytes[i] - b'0');
        let hours = digit(0) * 10 + digit(1);
        let minutes = digit(2) * 10 + digit(3);
        if hours > 23 || minutes > 59 {
            return ParsedClock::Invalid;
        }
        ParsedClock::Valid(hours * MINUTES_PER_HOUR + minutes)
    }

    pub fn minutes(self) -> Option<u32> {
        match self {
            ParsedClock::Valid(m) => Some(m),
            ParsedClock::Invalid => None,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, ParsedClock::Valid(_))
    }

    /// Legacy view: `Invalid` reads as midnight.
    pub fn or_sentinel(self) -> u32 {
        self.minutes().unwrap_or(0)
    }
}

/// Minutes since midnight for an `HHMM` string, `0` when malformed.
///
/// A `0` is only a real midnight when the input was literally `"0000"`;
/// use [`ParsedClock::parse`] to tell the two apart.
pub fn parse_clock(s: &str) -> u32 {
    ParsedClock::parse(s).or_sentinel()
}

/// Position of `name` in [`WEEKDAYS`], or [`UNKNOWN_WEEKDAY`].
pub fn weekday_index(name: &str) -> u8 {
    WEEKDAYS
        .iter()
        .position(|day| *day == name)
        .map_or(UNKNOWN_WEEKDAY, |i| i as u8)
}

/// Canonical name for an index produced by [`weekday_index`].
pub fn weekday_name(index: u8) -> Option<&'static str> {
    WEEKDAYS.get(usize::from(index)).copied()
}

/// Days from weekday `from` forward to weekday `to`, `0..=6`.
///
/// Both arguments must be canonical indices (`0..=6`).
pub fn days_until(from: u8, to: u8) -> u8 {
    (i16::from(to) - i16::from(from)).rem_euclid(i16::from(DAYS_PER_WEEK)) as u8
}

/// Canonical weekday index of `now`.
pub fn weekday_of(now: &NaiveDateTime) -> u8 {
    now.weekday().num_days_from_monday() as u8
}

/// Minutes since midnight of `now`, seconds truncated.
pub fn minutes_of_day(now: &NaiveDateTime) -> u32 {
    now.hour() * MINUTES_PER_HOUR + now.minute()
}

/// `"1400"` -> `"14:00"`. Strings that are not four bytes are returned as-is.
pub fn display_clock(s: &str) -> String {
    if s.len() == 4 && s.is_char_boundary(2) {
        format!("{}:{}", &s[..2], &s[2..])
    } else {
        s.to_string()
    }
}

/// Parse a stored due instant.
///
/// Offset-aware strings (`Z`, `+08:00`, `+0800`) are folded to their UTC
/// wall time; naive strings are taken as written; a bare date means midnight.
pub fn parse_instant(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.naive_utc());
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, layout) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
