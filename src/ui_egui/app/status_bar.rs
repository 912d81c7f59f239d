//! Status bar with class and conflict counts, and the last action's message.

use super::TimetableApp;
use egui::{Color32, RichText};

impl TimetableApp {
    pub(super) fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let classes = self.timetable.len();
                    ui.label(format!(
                        "{} class{}",
                        classes,
                        if classes == 1 { "" } else { "es" }
                    ));

                    let conflicts = self.timetable.conflicts().len();
                    if conflicts > 0 {
                        ui.separator();
                        ui.label(
                            RichText::new(format!("{} in conflict", conflicts))
                                .color(Color32::from_rgb(0xEF, 0x44, 0x44)),
                        );
                    }

                    if let Some(status) = &self.status {
                        ui.separator();
                        ui.label(status);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!(
                                "Drag to move · snaps to {} min",
                                self.settings.drag.snap_minutes
                            ))
                            .weak(),
                        );
                    });
                });
            });
    }
}
