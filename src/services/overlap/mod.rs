//! Conflict detection for classes sharing a day.
//!
//! Two classes conflict when they are on the same day and their ranges
//! intersect openly (`start_a < end_b && end_a > start_b`). Back-to-back
//! classes, where one ends exactly when the next begins, do not conflict.

use std::collections::{BTreeMap, HashSet};

use crate::models::event::{ClassEvent, Day, EventId};
use crate::utils::time::time_to_minutes;

#[derive(Debug, Clone, Copy)]
struct Interval<'a> {
    id: &'a EventId,
    start: i32,
    end: i32,
}

impl Interval<'_> {
    fn intersects(&self, other: &Interval<'_>) -> bool {
        self.start < other.end && self.end > other.start
    }
}

pub struct OverlapDetector;

impl OverlapDetector {
    /// Ids of every class that overlaps at least one other class on the same day.
    ///
    /// Compares each unordered pair within a day once. Classes whose times do
    /// not parse are skipped.
    pub fn detect(events: &[ClassEvent]) -> HashSet<EventId> {
        let mut overlaps = HashSet::new();

        for intervals in Self::intervals_by_day(events).values() {
            for (i, first) in intervals.iter().enumerate() {
                for second in &intervals[i + 1..] {
                    if first.intersects(second) {
                        overlaps.insert(first.id.clone());
                        overlaps.insert(second.id.clone());
                    }
                }
            }
        }

        overlaps
    }

    /// Same result as [`OverlapDetector::detect`] for well-ordered classes, in
    /// O(n log n) per day.
    ///
    /// After sorting by start, a class overlaps something earlier iff the
    /// largest end seen so far passes its start, and something later iff the
    /// next start comes before its end.
    pub fn detect_sweep(events: &[ClassEvent]) -> HashSet<EventId> {
        let mut overlaps = HashSet::new();

        for mut intervals in Self::intervals_by_day(events).into_values() {
            intervals.sort_by_key(|interval| (interval.start, interval.end));

            let mut furthest_end = i32::MIN;
            for (i, interval) in intervals.iter().enumerate() {
                let hits_earlier = furthest_end > interval.start;
                let hits_later = intervals
                    .get(i + 1)
                    .map_or(false, |next| next.start < interval.end);

                if hits_earlier || hits_later {
                    overlaps.insert(interval.id.clone());
                }
                furthest_end = furthest_end.max(interval.end);
            }
        }

        overlaps
    }

    fn intervals_by_day(events: &[ClassEvent]) -> BTreeMap<Day, Vec<Interval<'_>>> {
        let mut by_day: BTreeMap<Day, Vec<Interval<'_>>> = BTreeMap::new();

        for event in events {
            let parsed = time_to_minutes(&event.start_time)
                .and_then(|start| time_to_minutes(&event.end_time).map(|end| (start, end)));
            match parsed {
                Ok((start, end)) => by_day.entry(event.day).or_default().push(Interval {
                    id: &event.id,
                    start,
                    end,
                }),
                Err(err) => {
                    log::warn!("Skipping class {} in overlap check: {}", event.id, err);
                }
            }
        }

        by_day
    }
}
