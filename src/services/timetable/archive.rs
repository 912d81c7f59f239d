// Saved timetables
// Snapshots of earlier weeks, kept under their own store key

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::{retain_valid, Timetable, TimetableError};
use crate::models::event::ClassEvent;
use crate::services::storage::KeyValueStore;

pub const SAVED_TIMETABLES_KEY: &str = "schedulr-saved-timetables";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTimetable {
    pub id: String,
    pub name: String,
    pub classes: Vec<ClassEvent>,
    pub saved_at: DateTime<Local>,
}

impl SavedTimetable {
    fn snapshot(classes: Vec<ClassEvent>, now: DateTime<Local>) -> Self {
        Self {
            id: now.to_rfc3339(),
            name: format!("Timetable {}", now.format("%b %-d, %Y, %I:%M %p")),
            classes,
            saved_at: now,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimetableArchive {
    entries: Vec<SavedTimetable>,
}

impl TimetableArchive {
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        let mut entries: Vec<SavedTimetable> = match store.get(SAVED_TIMETABLES_KEY)? {
            Some(json) => {
                serde_json::from_str(&json).context("Failed to parse saved timetables")?
            }
            None => Vec::new(),
        };
        for entry in &mut entries {
            let classes = std::mem::take(&mut entry.classes);
            entry.classes = retain_valid(classes, &format!("\"{}\"", entry.name));
        }
        Ok(Self { entries })
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        let json =
            serde_json::to_string(&self.entries).context("Failed to serialize saved timetables")?;
        store.set(SAVED_TIMETABLES_KEY, &json)
    }

    /// Oldest first
    pub fn entries(&self) -> &[SavedTimetable] {
        &self.entries
    }

    /// Start a new week: stash the current classes, if any, and clear them.
    ///
    /// Returns the name of the new archive entry, or `None` when there was
    /// nothing to keep.
    pub fn archive_current(&mut self, timetable: &mut Timetable, now: DateTime<Local>) -> Option<String> {
        if timetable.is_empty() {
            timetable.replace_all(Vec::new());
            log::info!("Started a new empty timetable");
            return None;
        }

        let saved = SavedTimetable::snapshot(timetable.classes().to_vec(), now);
        let name = saved.name.clone();
        log::info!("Saved {} classes as \"{}\"", saved.classes.len(), name);

        self.entries.push(saved);
        timetable.replace_all(Vec::new());
        Some(name)
    }

    /// Replace the current classes with a saved copy. The entry stays archived.
    pub fn restore(&self, id: &str, timetable: &mut Timetable) -> Result<(), TimetableError> {
        let saved = self
            .entries
            .iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| TimetableError::NotFound(id.into()))?;

        timetable.replace_all(saved.classes.clone());
        log::info!("Loaded \"{}\"", saved.name);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Option<SavedTimetable> {
        let slot = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(slot))
    }
}
