//! Painting for the week grid.
//!
//! The grid is split into a day header strip, an hour label column and the
//! canvas. Everything that maps times to pixels goes through `GridLayout`, so
//! what is drawn here matches what the drag controller computes.

use std::collections::HashSet;

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};

use super::palette::{parse_color, readable_text_color, TimetablePalette};
use crate::models::event::{ClassEvent, Day, EventId};
use crate::services::layout::GridLayout;
use crate::ui_egui::drag::DragPreview;

pub const HEADER_HEIGHT: f32 = 32.0;
pub const TIME_LABEL_WIDTH: f32 = 56.0;
const BLOCK_ROUNDING: f32 = 4.0;
const BLOCK_PADDING: f32 = 4.0;

/// Screen rects for the three parts of the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub header: Rect,
    pub labels: Rect,
    pub canvas: Rect,
}

impl GridGeometry {
    pub fn split(outer: Rect) -> Self {
        let canvas_height = GridLayout::canvas_height(outer.height(), HEADER_HEIGHT);
        let canvas_min = outer.min + Vec2::new(TIME_LABEL_WIDTH, HEADER_HEIGHT);
        let canvas_width = (outer.width() - TIME_LABEL_WIDTH).max(0.0);

        Self {
            header: Rect::from_min_size(
                Pos2::new(canvas_min.x, outer.min.y),
                Vec2::new(canvas_width, HEADER_HEIGHT),
            ),
            labels: Rect::from_min_size(
                Pos2::new(outer.min.x, canvas_min.y),
                Vec2::new(TIME_LABEL_WIDTH, canvas_height),
            ),
            canvas: Rect::from_min_size(canvas_min, Vec2::new(canvas_width, canvas_height)),
        }
    }
}

/// Day names, hour labels, grid lines and today's column
pub(crate) fn paint_grid(
    painter: &Painter,
    geometry: &GridGeometry,
    layout: &GridLayout,
    palette: &TimetablePalette,
    today: Option<Day>,
) {
    let canvas = geometry.canvas;
    let column_width = layout.column_width(canvas.width());
    let pixels_per_hour = layout.pixels_per_hour(canvas.height());

    painter.rect_filled(canvas, 0.0, palette.grid_bg);

    if let Some(day) = today {
        let left = canvas.left() + day.index() as f32 * column_width;
        let column = Rect::from_min_size(
            Pos2::new(left, geometry.header.top()),
            Vec2::new(column_width, canvas.bottom() - geometry.header.top()),
        );
        painter.rect_filled(column, 0.0, palette.today_bg);
    }

    for day in Day::ALL {
        let center = Pos2::new(
            canvas.left() + (day.index() as f32 + 0.5) * column_width,
            geometry.header.center().y,
        );
        let label = if column_width < 90.0 {
            day.short_name()
        } else {
            day.name()
        };
        painter.text(
            center,
            Align2::CENTER_CENTER,
            label,
            FontId::proportional(14.0),
            palette.label,
        );

        let x = canvas.left() + day.index() as f32 * column_width;
        painter.line_segment(
            [Pos2::new(x, canvas.top()), Pos2::new(x, canvas.bottom())],
            Stroke::new(1.0, palette.hour_line),
        );
    }

    for (row, hour) in layout.grid().hours().enumerate() {
        let y = canvas.top() + row as f32 * pixels_per_hour;
        painter.line_segment(
            [Pos2::new(canvas.left(), y), Pos2::new(canvas.right(), y)],
            Stroke::new(1.0, palette.hour_line),
        );

        let half = y + pixels_per_hour / 2.0;
        painter.line_segment(
            [Pos2::new(canvas.left(), half), Pos2::new(canvas.right(), half)],
            Stroke::new(1.0, palette.half_hour_line),
        );

        painter.text(
            Pos2::new(geometry.labels.right() - 6.0, y + 2.0),
            Align2::RIGHT_TOP,
            format!("{:02}:00", hour),
            FontId::proportional(12.0),
            palette.label,
        );
    }

    painter.rect_stroke(canvas, 0.0, Stroke::new(1.0, palette.hour_line));
}

/// Class blocks in collection order. The dragged class is drawn last at its
/// preview position so it stays on top.
#[allow(clippy::too_many_arguments)]
pub(crate) fn paint_blocks(
    painter: &Painter,
    canvas: Rect,
    layout: &GridLayout,
    classes: &[ClassEvent],
    conflicts: &HashSet<EventId>,
    selected: Option<&EventId>,
    preview: Option<&DragPreview>,
    palette: &TimetablePalette,
) {
    let dragged = preview.map(|p| &p.event_id);
    let mut dragged_class = None;

    for (class, block) in layout.layout_all(classes, canvas.size()) {
        if Some(&class.id) == dragged {
            dragged_class = Some(class);
            continue;
        }
        let style = BlockStyle {
            conflicting: conflicts.contains(&class.id),
            selected: Some(&class.id) == selected,
            alpha: 255,
        };
        paint_block(painter, block.to_pixels(canvas), class, style, palette);
    }

    if let (Some(class), Some(preview)) = (dragged_class, preview) {
        let style = BlockStyle {
            conflicting: conflicts.contains(&class.id),
            selected: true,
            alpha: if preview.moved { 210 } else { 255 },
        };
        paint_block(painter, preview.rect, class, style, palette);
    }
}

#[derive(Clone, Copy)]
struct BlockStyle {
    conflicting: bool,
    selected: bool,
    alpha: u8,
}

fn paint_block(
    painter: &Painter,
    rect: Rect,
    class: &ClassEvent,
    style: BlockStyle,
    palette: &TimetablePalette,
) {
    let base = parse_color(&class.color).unwrap_or(palette.fallback_block);
    let fill = Color32::from_rgba_unmultiplied(base.r(), base.g(), base.b(), style.alpha);
    let text_color = readable_text_color(base);

    painter.rect_filled(rect, BLOCK_ROUNDING, fill);
    if style.conflicting {
        painter.rect_stroke(rect, BLOCK_ROUNDING, Stroke::new(2.5, palette.conflict));
    } else if style.selected {
        painter.rect_stroke(rect, BLOCK_ROUNDING, Stroke::new(2.0, palette.selected));
    }

    let clipped = painter.with_clip_rect(rect.shrink(1.0).intersect(painter.clip_rect()));
    let mut cursor = rect.min + Vec2::splat(BLOCK_PADDING);
    let lines = [
        (class.subject.clone(), FontId::proportional(13.0)),
        (
            format!("{} - {}", class.start_time, class.end_time),
            FontId::proportional(11.0),
        ),
        (class.teacher.clone(), FontId::proportional(11.0)),
    ];

    for (text, font) in lines {
        if text.is_empty() || cursor.y > rect.bottom() {
            continue;
        }
        let drawn = clipped.text(cursor, Align2::LEFT_TOP, text, font, text_color);
        cursor.y += drawn.height() + 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_split() {
        let outer = Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(756.0, 812.0));
        let geometry = GridGeometry::split(outer);

        assert_eq!(geometry.canvas.min, Pos2::new(66.0, 52.0));
        assert_eq!(geometry.canvas.size(), Vec2::new(700.0, 780.0));
        assert_eq!(geometry.header.height(), HEADER_HEIGHT);
        assert_eq!(geometry.labels.width(), TIME_LABEL_WIDTH);
        assert_eq!(geometry.labels.top(), geometry.canvas.top());
    }

    #[test]
    fn test_geometry_never_negative() {
        let outer = Rect::from_min_size(Pos2::ZERO, Vec2::new(20.0, 10.0));
        let geometry = GridGeometry::split(outer);

        assert_eq!(geometry.canvas.size(), Vec2::ZERO);
    }
}
