//! Pairwise overlap detection within each weekday.

use serde::{Deserialize, Serialize};

use crate::clock::DAYS_PER_WEEK;
use crate::model::{timetable_order, ScheduleEvent};

/// Two events on the same weekday whose time ranges overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clash {
    pub event1: ScheduleEvent,
    pub event2: ScheduleEvent,
    pub conflict: String,
}

impl Clash {
    fn between(first: &ScheduleEvent, second: &ScheduleEvent) -> Self {
        let conflict = format!(
            "Overlapping time slots on {}: {}-{} and {}-{}",
            first.day, first.start_time, first.end_time, second.start_time, second.end_time
        );
        Self {
            event1: first.clone(),
            event2: second.clone(),
            conflict,
        }
    }
}

/// Half-open overlap: ranges that only touch at an endpoint do not overlap.
pub fn overlaps(a: (u32, u32), b: (u32, u32)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Every overlapping pair, grouped by weekday in canonical order.
///
/// Within a day the events are taken in start-time order and each unordered
/// pair `(i, j)`, `i < j`, is checked once. Events with an unknown weekday or
/// an empty/malformed interval never clash.
pub fn detect_clashes(events: &[ScheduleEvent]) -> Vec<Clash> {
    let ordered = timetable_order(events);
    let mut clashes = Vec::new();

    for day in 0..DAYS_PER_WEEK {
        let slots: Vec<(&ScheduleEvent, (u32, u32))> = ordered
            .iter()
            .filter(|e| e.weekday() == Some(day))
            .filter_map(|e| e.interval().map(|range| (*e, range)))
            .collect();

        for (i, (first, a)) in slots.iter().enumerate() {
            for (second, b) in &slots[i + 1..] {
                if overlaps(*a, *b) {
                    clashes.push(Clash::between(first, second));
                }
            }
        }
    }

    if !clashes.is_empty() {
        tracing::debug!(count = clashes.len(), "timetable clashes detected");
    }
    clashes
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn event(module: &str, day: &str, start: &str, end: &str) -> ScheduleEvent {
        ScheduleEvent::new(module, "Lecture", day, start, end)
    }

    #[test]
    fn touching_endpoints_do_not_clash() {
        let events = vec![
            event("A", "Monday", "0900", "1000"),
            event("B", "Monday", "1000", "1100"),
        ];
        assert!(detect_clashes(&events).is_empty());
    }

    #[test]
    fn partial_overlap_is_one_clash() {
        let events = vec![
            event("A", "Monday", "0900", "1000"),
            event("B", "Monday", "0930", "1030"),
        ];
        let clashes = detect_clashes(&events);
        assert_eq!(clashes.len(), 1);
        assert_eq!(clashes[0].event1.module, "A");
        assert_eq!(clashes[0].event2.module, "B");
        assert_eq!(
            clashes[0].conflict,
            "Overlapping time slots on Monday: 0900-1000 and 0930-1030"
        );
    }

    #[test]
    fn different_weekdays_are_never_paired() {
        let events = vec![
            event("A", "Monday", "0900", "1000"),
            event("B", "Tuesday", "0900", "1000"),
        ];
        assert!(detect_clashes(&events).is_empty());
    }

    #[test]
    fn output_follows_day_then_start_order() {
        let events = vec![
            event("W2", "Wednesday", "1000", "1200"),
            event("M3", "Monday", "1100", "1300"),
            event("W1", "Wednesday", "0900", "1100"),
            event("M1", "Monday", "0800", "1200"),
            event("M2", "Monday", "0900", "1000"),
        ];
        let pairs: Vec<(String, String)> = detect_clashes(&events)
            .into_iter()
            .map(|c| (c.event1.module, c.event2.module))
            .collect();
        assert_eq!(
            pairs,
            [
                ("M1".to_string(), "M2".to_string()),
                ("M1".to_string(), "M3".to_string()),
                ("W1".to_string(), "W2".to_string()),
            ]
        );
    }

    #[test]
    fn unknown_days_and_broken_intervals_are_skipped() {
        let events = vec![
            event("A", "Someday", "0900", "1000"),
            event("B", "Someday", "0900", "1000"),
            event("C", "Monday", "abcd", "1000"),
            event("D", "Monday", "0900", "1000"),
            event("E", "Monday", "1100", "0800"),
        ];
        assert!(detect_clashes(&events).is_empty());
    }

    #[test]
    fn empty_input_yields_no_clashes() {
        assert!(detect_clashes(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a0 in 0u32..1440, a1 in 0u32..1440, b0 in 0u32..1440, b1 in 0u32..1440) {
            prop_assert_eq!(overlaps((a0, a1), (b0, b1)), overlaps((b0, b1), (a0, a1)));
        }

        #[test]
        fn adjacent_ranges_never_overlap(start in 0u32..1000, len1 in 1u32..200, len2 in 1u32..200) {
            let mid = start + len1;
            prop_assert!(!overlaps((start, mid), (mid, mid + len2)));
        }
    }
}
