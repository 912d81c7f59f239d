// Property tests for conflict detection
// Random weeks of classes checked against the open-interval overlap rule

#[path = "../fixtures/mod.rs"]
mod fixtures;

use std::collections::HashSet;

use proptest::prelude::*;
use schedulr::models::event::{ClassEvent, Day, EventId};
use schedulr::services::overlap::OverlapDetector;

/// (day, start, length) with every class inside 08:00-21:00
fn class_strategy() -> impl Strategy<Value = (usize, i32, i32)> {
    (0..7usize, 480..1250i32, 1..120i32)
        .prop_map(|(day, start, length)| (day, start, length.min(1260 - start)))
}

fn build_week(specs: &[(usize, i32, i32)]) -> Vec<ClassEvent> {
    specs
        .iter()
        .enumerate()
        .map(|(i, &(day, start, length))| {
            let day = Day::from_index(day).unwrap();
            fixtures::class_at(&i.to_string(), day, start, start + length)
        })
        .collect()
}

fn brute_force(events: &[ClassEvent]) -> HashSet<EventId> {
    let mut out = HashSet::new();
    let bounds: Vec<(i32, i32)> = events
        .iter()
        .map(|e| {
            (
                schedulr::utils::time::time_to_minutes(&e.start_time).unwrap(),
                schedulr::utils::time::time_to_minutes(&e.end_time).unwrap(),
            )
        })
        .collect();

    for i in 0..events.len() {
        for j in (i + 1)..events.len() {
            let (a_start, a_end) = bounds[i];
            let (b_start, b_end) = bounds[j];
            if events[i].day == events[j].day && a_start < b_end && b_start < a_end {
                out.insert(events[i].id.clone());
                out.insert(events[j].id.clone());
            }
        }
    }
    out
}

proptest! {
    /// Property: the sweep agrees with checking every pair
    #[test]
    fn prop_sweep_matches_pairwise(specs in prop::collection::vec(class_strategy(), 0..40)) {
        let week = build_week(&specs);
        prop_assert_eq!(OverlapDetector::detect_sweep(&week), OverlapDetector::detect(&week));
    }

    /// Property: both detectors match a direct reading of the rule
    #[test]
    fn prop_detect_matches_rule(specs in prop::collection::vec(class_strategy(), 0..25)) {
        let week = build_week(&specs);
        prop_assert_eq!(OverlapDetector::detect(&week), brute_force(&week));
    }

    /// Property: input order never changes the result
    #[test]
    fn prop_order_independent(specs in prop::collection::vec(class_strategy(), 0..25)) {
        let week = build_week(&specs);
        let mut reversed = week.clone();
        reversed.reverse();
        prop_assert_eq!(OverlapDetector::detect(&week), OverlapDetector::detect(&reversed));
    }

    /// Property: classes laid end to end never conflict
    #[test]
    fn prop_back_to_back_is_free(
        day in 0..7usize,
        lengths in prop::collection::vec(1..60i32, 1..12),
    ) {
        let day = Day::from_index(day).unwrap();
        let mut start = 480;
        let week: Vec<ClassEvent> = lengths
            .iter()
            .enumerate()
            .map(|(i, length)| {
                let class = fixtures::class_at(&i.to_string(), day, start, start + length);
                start += length;
                class
            })
            .collect();

        prop_assert!(OverlapDetector::detect(&week).is_empty());
        prop_assert!(OverlapDetector::detect_sweep(&week).is_empty());
    }

    /// Property: a copy of any class conflicts with the original
    #[test]
    fn prop_duplicate_always_conflicts(shape in class_strategy()) {
        let mut week = build_week(&[shape]);
        let mut copy = week[0].clone();
        copy.id = EventId::from("copy");
        week.push(copy);

        let conflicts = OverlapDetector::detect(&week);
        prop_assert_eq!(conflicts.len(), 2);
    }
}
