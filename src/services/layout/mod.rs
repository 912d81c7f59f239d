//! Maps classes onto the week canvas.
//!
//! The canvas is seven equal day columns by `total_hours` equal hour rows.
//! Vertical values are in pixels, horizontal values in percent of the canvas
//! width, so a layout survives width-only resizes unchanged.

use egui::{Pos2, Rect, Vec2};

use crate::models::event::{ClassEvent, Day};
use crate::models::settings::GridSettings;
use crate::utils::time::{self, TimeError};

pub const DAY_COUNT: usize = Day::ALL.len();

/// Placement of one class block on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockRect {
    pub top_px: f32,
    pub left_percent: f32,
    pub width_percent: f32,
    pub height_px: f32,
}

impl BlockRect {
    /// Absolute screen rect for a canvas placed at `canvas`
    pub fn to_pixels(&self, canvas: Rect) -> Rect {
        let left = self.left_percent / 100.0 * canvas.width();
        let width = self.width_percent / 100.0 * canvas.width();
        Rect::from_min_size(
            canvas.min + Vec2::new(left, self.top_px),
            Vec2::new(width, self.height_px),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    grid: GridSettings,
}

impl GridLayout {
    pub fn new(grid: GridSettings) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &GridSettings {
        &self.grid
    }

    pub fn pixels_per_hour(&self, canvas_height: f32) -> f32 {
        canvas_height / self.grid.total_hours().max(1) as f32
    }

    pub fn column_width(&self, canvas_width: f32) -> f32 {
        canvas_width / DAY_COUNT as f32
    }

    pub fn column_width_percent(&self) -> f32 {
        100.0 / DAY_COUNT as f32
    }

    /// Height left for hour rows once the day header has been measured
    pub fn canvas_height(available_height: f32, header_height: f32) -> f32 {
        (available_height - header_height).max(0.0)
    }

    /// Place one class. Overlapping classes get the full column each and stack.
    pub fn layout(&self, event: &ClassEvent, canvas: Vec2) -> Result<BlockRect, TimeError> {
        let pixels_per_hour = self.pixels_per_hour(canvas.y);
        let top = time::hour_position(&event.start_time, &self.grid)?;
        let height = time::duration_hours(&event.start_time, &event.end_time)?;
        let column = self.column_width_percent();

        Ok(BlockRect {
            top_px: top * pixels_per_hour,
            left_percent: event.day.index() as f32 * column,
            width_percent: column,
            height_px: height * pixels_per_hour,
        })
    }

    /// Place every class that has parseable times, in input order
    pub fn layout_all<'a>(
        &self,
        events: &'a [ClassEvent],
        canvas: Vec2,
    ) -> Vec<(&'a ClassEvent, BlockRect)> {
        events
            .iter()
            .filter_map(|event| match self.layout(event, canvas) {
                Ok(block) => Some((event, block)),
                Err(err) => {
                    log::warn!("Not drawing class {}: {}", event.id, err);
                    None
                }
            })
            .collect()
    }

    /// Topmost class under `pointer`. Later classes are drawn over earlier ones.
    pub fn hit_test<'a>(
        &self,
        events: &'a [ClassEvent],
        canvas: Rect,
        pointer: Pos2,
    ) -> Option<&'a ClassEvent> {
        self.layout_all(events, canvas.size())
            .into_iter()
            .rev()
            .find(|(_, block)| block.to_pixels(canvas).contains(pointer))
            .map(|(event, _)| event)
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(GridSettings::default())
    }
}
