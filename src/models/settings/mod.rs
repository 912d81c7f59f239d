// Settings module
// Grid geometry and drag tuning, loaded from schedulr.toml

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("Grid start hour ({start}) must be before end hour ({end}), and end hour at most 24")]
    InvalidHourRange { start: u32, end: u32 },

    #[error("Snap interval must be at least one minute")]
    ZeroSnap,

    #[error("Drag threshold must be a non-negative number of pixels, got {0}")]
    InvalidThreshold(f32),
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grid: GridSettings,
    pub drag: DragSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.grid.validate()?;
        self.drag.validate()
    }
}

/// Hour axis of the canvas. Hours run from `start_hour` up to, not including, `end_hour`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 21,
        }
    }
}

impl GridSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.start_hour >= self.end_hour || self.end_hour > 24 {
            return Err(SettingsError::InvalidHourRange {
                start: self.start_hour,
                end: self.end_hour,
            });
        }
        Ok(())
    }

    /// First addressable minute of the canvas, counted from midnight
    pub fn start_minutes(&self) -> i32 {
        self.start_hour as i32 * 60
    }

    /// Number of hour rows
    pub fn total_hours(&self) -> u32 {
        self.end_hour.saturating_sub(self.start_hour)
    }

    pub fn total_minutes(&self) -> i32 {
        self.total_hours() as i32 * 60
    }

    /// Hour labels in row order
    pub fn hours(&self) -> std::ops::Range<u32> {
        self.start_hour..self.end_hour
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragSettings {
    /// Pointer travel (Euclidean, in pixels) that turns a click into a drag
    pub threshold_px: f32,
    /// Granularity that dropped classes snap to
    pub snap_minutes: u32,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            threshold_px: 3.0,
            snap_minutes: 5,
        }
    }
}

impl DragSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.snap_minutes == 0 {
            return Err(SettingsError::ZeroSnap);
        }
        if self.threshold_px.is_nan() || self.threshold_px < 0.0 {
            return Err(SettingsError::InvalidThreshold(self.threshold_px));
        }
        Ok(())
    }
}
