use super::TimetableApp;

enum ArchiveAction {
    Load(String),
    Remove(String),
}

impl TimetableApp {
    pub(super) fn render_menu_bar(&mut self, ctx: &egui::Context) {
        let mut new_timetable = false;
        let mut archive_action = None;

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Timetable", |ui| {
                    if ui
                        .button("New timetable")
                        .on_hover_text("Save the current week and start an empty one")
                        .clicked()
                    {
                        new_timetable = true;
                        ui.close_menu();
                    }
                });

                ui.menu_button("Saved", |ui| {
                    if self.archive.entries().is_empty() {
                        ui.label("No saved timetables");
                    }
                    for entry in self.archive.entries() {
                        ui.horizontal(|ui| {
                            let label = format!("{} ({} classes)", entry.name, entry.classes.len());
                            if ui.button(label).clicked() {
                                archive_action = Some(ArchiveAction::Load(entry.id.clone()));
                                ui.close_menu();
                            }
                            if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                                archive_action = Some(ArchiveAction::Remove(entry.id.clone()));
                                ui.close_menu();
                            }
                        });
                    }
                });
            });
        });

        if new_timetable {
            self.start_new_timetable();
        }

        match archive_action {
            Some(ArchiveAction::Load(id)) => {
                self.drag.cancel();
                match self.archive.restore(&id, &mut self.timetable) {
                    Ok(()) => {
                        let name = self
                            .archive
                            .entries()
                            .iter()
                            .find(|entry| entry.id == id)
                            .map(|entry| entry.name.clone())
                            .unwrap_or_default();
                        self.status = Some(format!("Loaded \"{}\"", name));
                        self.persist();
                    }
                    Err(e) => log::warn!("Failed to load saved timetable: {}", e),
                }
            }
            Some(ArchiveAction::Remove(id)) => {
                if let Some(removed) = self.archive.remove(&id) {
                    self.status = Some(format!("Deleted \"{}\"", removed.name));
                    self.persist();
                }
            }
            None => {}
        }
    }
}
