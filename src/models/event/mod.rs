// Event module
// Timetable class model placed on the weekly grid

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::utils::time::{self, TimeError};

/// Palette handed out to new and imported classes.
pub const DEFAULT_COLORS: [&str; 5] = ["#4C586B", "#C1A27F", "#5F6977", "#8B5CF6", "#EF4444"];

/// Opaque class identifier. Stable for the lifetime of a class and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EventId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Day column of the weekly grid, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// All days in column order
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Zero-based column index
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Day> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    /// Three-letter header label
    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = EventValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::ALL
            .iter()
            .copied()
            .find(|day| day.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EventValidationError::UnknownDay(s.to_string()))
    }
}

impl From<Day> for chrono::Weekday {
    fn from(day: Day) -> Self {
        match day {
            Day::Monday => chrono::Weekday::Mon,
            Day::Tuesday => chrono::Weekday::Tue,
            Day::Wednesday => chrono::Weekday::Wed,
            Day::Thursday => chrono::Weekday::Thu,
            Day::Friday => chrono::Weekday::Fri,
            Day::Saturday => chrono::Weekday::Sat,
            Day::Sunday => chrono::Weekday::Sun,
        }
    }
}

impl From<chrono::Weekday> for Day {
    fn from(weekday: chrono::Weekday) -> Self {
        Day::ALL[weekday.num_days_from_monday() as usize]
    }
}

/// Errors raised when a class fails form-level validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventValidationError {
    #[error("Class subject cannot be empty")]
    EmptySubject,

    #[error("End time ({end}) must be after start time ({start})")]
    InvalidTimeRange { start: String, end: String },

    #[error("Color must be in hex format (#RRGGBB or #RGB), got {0:?}")]
    InvalidColor(String),

    #[error("Unknown day {0:?}")]
    UnknownDay(String),

    #[error(transparent)]
    Time(#[from] TimeError),
}

/// New placement for a class produced by a drag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveUpdate {
    pub day: Day,
    pub start_time: String,
    pub end_time: String,
}

/// A scheduled class occupying one day and a start/end range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEvent {
    pub id: EventId,
    pub subject: String,
    #[serde(default)]
    pub teacher: String,
    pub day: Day,
    /// `HH:MM`, 24-hour
    pub start_time: String,
    /// `HH:MM`, 24-hour
    pub end_time: String,
    pub color: String,
    #[serde(default)]
    pub description: String,
}

impl ClassEvent {
    /// Create a new class with the required fields and a fresh id.
    ///
    /// # Examples
    /// ```
    /// use schedulr::models::event::{ClassEvent, Day};
    ///
    /// let class = ClassEvent::new("Mathematics", Day::Monday, "09:00", "10:30").unwrap();
    /// assert_eq!(class.duration_minutes().unwrap(), 90);
    /// ```
    pub fn new(
        subject: impl Into<String>,
        day: Day,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Result<Self, EventValidationError> {
        Self::builder()
            .subject(subject)
            .day(day)
            .start_time(start_time)
            .end_time(end_time)
            .build()
    }

    pub fn builder() -> ClassEventBuilder {
        ClassEventBuilder::new()
    }

    /// Validate the class the same way the editing form does
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.subject.trim().is_empty() {
            return Err(EventValidationError::EmptySubject);
        }

        let start = time::time_to_minutes(&self.start_time)?;
        let end = time::time_to_minutes(&self.end_time)?;
        if end <= start {
            return Err(EventValidationError::InvalidTimeRange {
                start: self.start_time.clone(),
                end: self.end_time.clone(),
            });
        }

        if !is_valid_hex_color(&self.color) {
            return Err(EventValidationError::InvalidColor(self.color.clone()));
        }

        Ok(())
    }

    pub fn duration_minutes(&self) -> Result<i32, TimeError> {
        time::duration_minutes(&self.start_time, &self.end_time)
    }

    /// Copy of this class under a fresh id
    pub fn duplicated(&self) -> Self {
        Self {
            id: EventId::new(),
            ..self.clone()
        }
    }

    /// Merge a drag result into this class, leaving the free-text fields alone
    pub fn apply_move(&mut self, update: &MoveUpdate) {
        self.day = update.day;
        self.start_time = update.start_time.clone();
        self.end_time = update.end_time.clone();
    }
}

/// Check for `#RGB` or `#RRGGBB`
pub fn is_valid_hex_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Builder for classes with optional fields
pub struct ClassEventBuilder {
    id: Option<EventId>,
    subject: Option<String>,
    teacher: String,
    day: Day,
    start_time: Option<String>,
    end_time: Option<String>,
    color: String,
    description: String,
}

impl ClassEventBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            subject: None,
            teacher: String::new(),
            day: Day::Monday,
            start_time: None,
            end_time: None,
            color: DEFAULT_COLORS[0].to_string(),
            description: String::new(),
        }
    }

    /// Use a known id instead of generating one
    pub fn id(mut self, id: impl Into<EventId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn teacher(mut self, teacher: impl Into<String>) -> Self {
        self.teacher = teacher.into();
        self
    }

    pub fn day(mut self, day: Day) -> Self {
        self.day = day;
        self
    }

    pub fn start_time(mut self, start_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    pub fn end_time(mut self, end_time: impl Into<String>) -> Self {
        self.end_time = Some(end_time.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn build(self) -> Result<ClassEvent, EventValidationError> {
        let class = ClassEvent {
            id: self.id.unwrap_or_default(),
            subject: self.subject.unwrap_or_default(),
            teacher: self.teacher,
            day: self.day,
            start_time: self.start_time.unwrap_or_default(),
            end_time: self.end_time.unwrap_or_default(),
            color: self.color,
            description: self.description,
        };

        class.validate()?;
        Ok(class)
    }
}

impl Default for ClassEventBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Classes shown on first launch, before anything has been saved
pub fn sample_week() -> Vec<ClassEvent> {
    let rows: [(&str, &str, &str, Day, &str, &str, usize); 6] = [
        ("1", "Mathematics", "Dr. Smith", Day::Monday, "09:00", "10:30", 0),
        ("2", "Physics", "Prof. Johnson", Day::Monday, "11:00", "12:30", 1),
        ("3", "Chemistry", "Dr. Williams", Day::Wednesday, "09:00", "10:30", 2),
        ("4", "English Literature", "Ms. Davis", Day::Tuesday, "14:00", "15:30", 3),
        ("5", "Computer Science", "Mr. Brown", Day::Thursday, "10:00", "11:30", 4),
        ("6", "History", "Dr. Miller", Day::Friday, "13:00", "14:30", 0),
    ];

    rows.iter()
        .map(|&(id, subject, teacher, day, start, end, color)| ClassEvent {
            id: EventId::from(id),
            subject: subject.to_string(),
            teacher: teacher.to_string(),
            day,
            start_time: start.to_string(),
            end_time: end.to_string(),
            color: DEFAULT_COLORS[color].to_string(),
            description: String::new(),
        })
        .collect()
}
