use super::TimetableApp;
use crate::models::event::ClassEvent;
use egui::{Color32, RichText};

enum DetailsAction {
    Duplicate,
    Delete,
    Close,
}

impl TimetableApp {
    /// Read-only view of the selected class
    pub(super) fn render_details(&mut self, ctx: &egui::Context) {
        let Some(class) = self.timetable.selected().cloned() else {
            return;
        };
        let conflicting = self.timetable.is_conflicting(&class.id);

        let mut open = true;
        let mut action = None;
        egui::Window::new(RichText::new(&class.subject).strong())
            .id(egui::Id::new("class_details"))
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                render_fields(ui, &class);

                if conflicting {
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new("Overlaps another class on this day")
                            .color(Color32::from_rgb(0xEF, 0x44, 0x44)),
                    );
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Duplicate").clicked() {
                        action = Some(DetailsAction::Duplicate);
                    }
                    if ui.button("Delete").clicked() {
                        action = Some(DetailsAction::Delete);
                    }
                    if ui.button("Close").clicked() {
                        action = Some(DetailsAction::Close);
                    }
                });
            });

        if !open {
            action = Some(DetailsAction::Close);
        }

        match action {
            Some(DetailsAction::Duplicate) => match self.timetable.duplicate(&class.id) {
                Ok(copy) => {
                    self.timetable.select(&copy);
                    self.status = Some(format!("Duplicated {}", class.subject));
                    self.persist();
                }
                Err(e) => log::warn!("Duplicate failed: {}", e),
            },
            Some(DetailsAction::Delete) => match self.timetable.delete(&class.id) {
                Ok(removed) => {
                    self.status = Some(format!("Deleted {}", removed.subject));
                    self.persist();
                }
                Err(e) => log::warn!("Delete failed: {}", e),
            },
            Some(DetailsAction::Close) => self.timetable.clear_selection(),
            None => {}
        }
    }
}

fn render_fields(ui: &mut egui::Ui, class: &ClassEvent) {
    egui::Grid::new("class_details_grid")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            ui.label("Day");
            ui.label(class.day.name());
            ui.end_row();

            ui.label("Time");
            ui.label(format!("{} - {}", class.start_time, class.end_time));
            ui.end_row();

            if let Ok(minutes) = class.duration_minutes() {
                ui.label("Length");
                ui.label(format!("{} min", minutes));
                ui.end_row();
            }

            if !class.teacher.is_empty() {
                ui.label("Teacher");
                ui.label(&class.teacher);
                ui.end_row();
            }
        });

    if !class.description.is_empty() {
        ui.separator();
        ui.label(&class.description);
    }
}
