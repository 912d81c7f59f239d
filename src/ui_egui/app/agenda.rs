//! Side list of the week in reading order. Clicking a row selects the class.

use super::TimetableApp;
use crate::models::event::{ClassEvent, Day};
use crate::services::timetable::Timetable;
use egui::{Color32, RichText};

const CONFLICT_COLOR: Color32 = Color32::from_rgb(0xEF, 0x44, 0x44);

/// Agenda rows grouped under their day, days without classes left out
fn group_by_day(timetable: &Timetable) -> Vec<(Day, Vec<&ClassEvent>)> {
    let mut groups: Vec<(Day, Vec<&ClassEvent>)> = Vec::new();
    for class in timetable.agenda() {
        if let Some((day, rows)) = groups.last_mut() {
            if *day == class.day {
                rows.push(class);
                continue;
            }
        }
        groups.push((class.day, vec![class]));
    }
    groups
}

fn row_label(class: &ClassEvent, conflicting: bool) -> String {
    let marker = if conflicting { "⚠ " } else { "" };
    format!(
        "{}{}-{}  {}",
        marker, class.start_time, class.end_time, class.subject
    )
}

impl TimetableApp {
    pub(super) fn render_agenda(&mut self, ctx: &egui::Context) {
        let mut clicked = None;

        egui::SidePanel::left("agenda")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("This week");
                ui.separator();

                if self.timetable.is_empty() {
                    ui.label(RichText::new("No classes yet").weak());
                    return;
                }

                let selected = self.timetable.selected().map(|class| class.id.clone());
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for (day, rows) in group_by_day(&self.timetable) {
                        ui.add_space(4.0);
                        ui.label(RichText::new(day.name()).strong());

                        for class in rows {
                            let conflicting = self.timetable.is_conflicting(&class.id);
                            let mut text = RichText::new(row_label(class, conflicting));
                            if conflicting {
                                text = text.color(CONFLICT_COLOR);
                            }
                            let is_selected = selected.as_ref() == Some(&class.id);
                            if ui.selectable_label(is_selected, text).clicked() {
                                clicked = Some(class.id.clone());
                            }
                        }
                    }
                });
            });

        if let Some(id) = clicked {
            self.drag.cancel();
            self.timetable.select(&id);
        }
    }
}
