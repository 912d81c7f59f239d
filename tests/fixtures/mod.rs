// Test fixtures - reusable test data
// Provides consistent classes across the integration and property tests

#![allow(dead_code)]

use schedulr::models::event::{ClassEvent, Day};
use schedulr::utils::time::minutes_to_time;

/// Class with a fixed id so assertions can name it
pub fn class(id: &str, day: Day, start: &str, end: &str) -> ClassEvent {
    ClassEvent::builder()
        .id(id)
        .subject(format!("Class {}", id))
        .day(day)
        .start_time(start)
        .end_time(end)
        .build()
        .expect("fixture class should be valid")
}

/// Class from minute offsets after midnight
pub fn class_at(id: &str, day: Day, start: i32, end: i32) -> ClassEvent {
    class(id, day, &minutes_to_time(start), &minutes_to_time(end))
}

/// Two Monday classes sharing 10:00-10:30
pub fn overlapping_pair() -> Vec<ClassEvent> {
    vec![
        class("early", Day::Monday, "09:00", "10:30"),
        class("late", Day::Monday, "10:00", "11:00"),
    ]
}

/// Classes that meet at a boundary or sit on different days
pub fn conflict_free() -> Vec<ClassEvent> {
    vec![
        class("a", Day::Monday, "09:00", "10:00"),
        class("b", Day::Monday, "10:00", "11:00"),
        class("c", Day::Tuesday, "09:30", "10:30"),
    ]
}
