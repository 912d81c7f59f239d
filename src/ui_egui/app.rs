mod agenda;
mod details;
mod input;
mod lifecycle;
mod menu;
mod status_bar;

use chrono::{Datelike, Local};

use crate::models::event::Day;
use crate::models::settings::Settings;
use crate::services::layout::GridLayout;
use crate::services::storage::KeyValueStore;
use crate::services::timetable::{Timetable, TimetableArchive};
use crate::ui_egui::drag::DragController;
use crate::ui_egui::views::palette::TimetablePalette;
use crate::ui_egui::views::time_grid::{paint_blocks, paint_grid, GridGeometry};

const MIN_GRID_WIDTH: f32 = 480.0;
const MIN_GRID_HEIGHT: f32 = 360.0;

pub struct TimetableApp {
    /// Where the timetable and saved timetables are written after each change
    store: Box<dyn KeyValueStore>,
    settings: Settings,
    layout: GridLayout,
    timetable: Timetable,
    archive: TimetableArchive,
    drag: DragController,
    /// Canvas rect from the last painted frame, used to route pointer input
    canvas: Option<egui::Rect>,
    /// Last user-facing message for the status bar
    status: Option<String>,
}

impl eframe::App for TimetableApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_update(ctx, frame);
    }
}

impl TimetableApp {
    fn render_main_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui
                .available_size()
                .max(egui::vec2(MIN_GRID_WIDTH, MIN_GRID_HEIGHT));
            let (outer, _) = ui.allocate_exact_size(available, egui::Sense::hover());
            let geometry = GridGeometry::split(outer);
            let palette = TimetablePalette::from_visuals(ui.visuals());
            let today = Day::from(Local::now().weekday());
            let painter = ui.painter_at(outer);

            paint_grid(&painter, &geometry, &self.layout, &palette, Some(today));

            let preview = self.drag.preview();
            let selected = self.timetable.selected().map(|class| class.id.clone());
            paint_blocks(
                &painter,
                geometry.canvas,
                &self.layout,
                self.timetable.classes(),
                self.timetable.conflicts(),
                selected.as_ref(),
                preview.as_ref(),
                &palette,
            );

            if self.timetable.is_empty() {
                painter.text(
                    geometry.canvas.center(),
                    egui::Align2::CENTER_CENTER,
                    "No classes yet",
                    egui::FontId::proportional(16.0),
                    palette.label,
                );
            }

            self.canvas = Some(geometry.canvas);
        });
    }
}
