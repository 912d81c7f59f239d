//! The class collection behind the grid.
//!
//! Owns the classes and the current selection, and recomputes the conflict
//! set after every change so readers never see a stale one.

use std::collections::HashSet;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::models::event::{sample_week, ClassEvent, EventId, EventValidationError, MoveUpdate};
use crate::services::overlap::OverlapDetector;
use crate::services::storage::KeyValueStore;
use crate::ui_egui::drag::DragHandler;
use crate::utils::time::time_to_minutes;

pub mod archive;

pub use archive::{SavedTimetable, TimetableArchive};

/// Store key for the current classes
pub const TIMETABLE_KEY: &str = "schedulr-timetable";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimetableError {
    #[error("No class with id {0}")]
    NotFound(EventId),

    #[error(transparent)]
    Invalid(#[from] EventValidationError),
}

#[derive(Debug, Clone, Default)]
pub struct Timetable {
    classes: Vec<ClassEvent>,
    conflicts: HashSet<EventId>,
    selected: Option<EventId>,
}

impl Timetable {
    pub fn new(classes: Vec<ClassEvent>) -> Self {
        let mut timetable = Self {
            classes,
            conflicts: HashSet::new(),
            selected: None,
        };
        timetable.refresh_conflicts();
        timetable
    }

    /// Load the saved classes, or the sample week if nothing was saved yet
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        let classes = match store.get(TIMETABLE_KEY)? {
            Some(json) => {
                let stored = serde_json::from_str(&json).context("Failed to parse saved timetable")?;
                retain_valid(stored, "saved timetable")
            }
            None => {
                log::info!("No saved timetable, starting with the sample week");
                sample_week()
            }
        };
        Ok(Self::new(classes))
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        let json = serde_json::to_string(&self.classes).context("Failed to serialize timetable")?;
        store.set(TIMETABLE_KEY, &json)
    }

    pub fn classes(&self) -> &[ClassEvent] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get(&self, id: &EventId) -> Option<&ClassEvent> {
        self.classes.iter().find(|class| &class.id == id)
    }

    pub fn conflicts(&self) -> &HashSet<EventId> {
        &self.conflicts
    }

    pub fn is_conflicting(&self, id: &EventId) -> bool {
        self.conflicts.contains(id)
    }

    /// Validate and append a class under a fresh id
    pub fn add(&mut self, mut class: ClassEvent) -> Result<EventId, TimetableError> {
        class.validate()?;
        class.id = EventId::new();
        let id = class.id.clone();

        log::info!("Added class {} ({})", id, class.subject);
        self.classes.push(class);
        self.refresh_conflicts();
        Ok(id)
    }

    /// Replace every field of an existing class except its id
    pub fn update(&mut self, id: &EventId, mut class: ClassEvent) -> Result<(), TimetableError> {
        class.validate()?;
        let slot = self.position(id)?;
        class.id = id.clone();

        self.classes[slot] = class;
        log::info!("Updated class {}", id);
        self.refresh_conflicts();
        Ok(())
    }

    pub fn delete(&mut self, id: &EventId) -> Result<ClassEvent, TimetableError> {
        let slot = self.position(id)?;
        let removed = self.classes.remove(slot);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }

        log::info!("Deleted class {}", id);
        self.refresh_conflicts();
        Ok(removed)
    }

    pub fn duplicate(&mut self, id: &EventId) -> Result<EventId, TimetableError> {
        let copy = self.get(id).ok_or_else(|| TimetableError::NotFound(id.clone()))?.duplicated();
        let new_id = copy.id.clone();

        log::info!("Duplicated class {} as {}", id, new_id);
        self.classes.push(copy);
        self.refresh_conflicts();
        Ok(new_id)
    }

    /// Apply a drag result. Only day and times change.
    pub fn move_event(&mut self, id: &EventId, update: &MoveUpdate) -> Result<(), TimetableError> {
        let slot = self.position(id)?;
        self.classes[slot].apply_move(update);

        log::info!(
            "Moved class {} to {} {}-{}",
            id,
            update.day,
            update.start_time,
            update.end_time
        );
        self.refresh_conflicts();
        Ok(())
    }

    /// Swap in a whole new set of classes, e.g. when restoring an archive
    pub fn replace_all(&mut self, classes: Vec<ClassEvent>) {
        self.classes = classes;
        self.selected = None;
        self.refresh_conflicts();
    }

    /// Select a class for the details view. Unknown ids are ignored.
    pub fn select(&mut self, id: &EventId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.selected = Some(id.clone());
        true
    }

    pub fn selected(&self) -> Option<&ClassEvent> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Classes in reading order: by day, then by start time
    pub fn agenda(&self) -> Vec<&ClassEvent> {
        let mut ordered: Vec<&ClassEvent> = self.classes.iter().collect();
        ordered.sort_by_key(|class| {
            (
                class.day.index(),
                time_to_minutes(&class.start_time).unwrap_or(i32::MAX),
            )
        });
        ordered
    }

    fn position(&self, id: &EventId) -> Result<usize, TimetableError> {
        self.classes
            .iter()
            .position(|class| &class.id == id)
            .ok_or_else(|| TimetableError::NotFound(id.clone()))
    }

    fn refresh_conflicts(&mut self) {
        self.conflicts = OverlapDetector::detect(&self.classes);
        log::debug!(
            "{} of {} classes are in conflict",
            self.conflicts.len(),
            self.classes.len()
        );
    }
}

/// Drop classes that would not pass the editing form. Stored data is not
/// trusted to have gone through it.
pub(crate) fn retain_valid(classes: Vec<ClassEvent>, source: &str) -> Vec<ClassEvent> {
    let total = classes.len();
    let mut rejected = Vec::new();
    let kept: Vec<ClassEvent> = classes
        .into_iter()
        .filter(|class| match class.validate() {
            Ok(()) => true,
            Err(err) => {
                rejected.push(format!("{} ({})", class.id, err));
                false
            }
        })
        .collect();

    if !rejected.is_empty() {
        log::warn!(
            "Dropped {} of {} classes from {}: {}",
            rejected.len(),
            total,
            source,
            rejected.join(", ")
        );
    }
    kept
}

impl DragHandler for Timetable {
    fn on_select(&mut self, event: ClassEvent) {
        self.select(&event.id);
    }

    fn on_commit_move(&mut self, id: EventId, update: MoveUpdate) {
        if let Err(err) = self.move_event(&id, &update) {
            log::warn!("Dropped move for class {}: {}", id, err);
        }
    }
}
