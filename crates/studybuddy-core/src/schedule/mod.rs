//! Weekly timetable views: clash detection, next-class lookup and the
//! combined schedule widget.
//!
//! Events recur every week on their weekday, so all arithmetic here works on
//! (weekday index, minutes since midnight) pairs rather than instants.

pub mod clash;
pub mod next_class;
pub mod summary;

pub use clash::{detect_clashes, overlaps, Clash};
pub use next_class::{find_next_class, format_time_until, NextClassInfo};
pub use summary::{schedule_summary, ScheduleSummary};
