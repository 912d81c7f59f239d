use super::TimetableApp;
use crate::models::event::sample_week;
use crate::services::database::Database;
use crate::services::layout::GridLayout;
use crate::services::settings::SettingsService;
use crate::services::storage::{KeyValueStore, MemoryStore};
use crate::services::timetable::{Timetable, TimetableArchive};
use crate::ui_egui::drag::DragController;
use anyhow::{Context, Result};
use chrono::Local;
use directories::ProjectDirs;
use std::path::PathBuf;

const DATABASE_FILE_NAME: &str = "schedulr.db";

impl TimetableApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let settings = SettingsService::load_or_default(SettingsService::default_path().as_deref());
        log::info!(
            "Grid runs {:02}:00-{:02}:00, snapping to {} minutes",
            settings.grid.start_hour,
            settings.grid.end_hour,
            settings.drag.snap_minutes
        );

        let store = open_store();
        let timetable = Timetable::load(&*store).unwrap_or_else(|e| {
            log::warn!("Failed to load timetable: {:#}, using the sample week", e);
            Timetable::new(sample_week())
        });
        let archive = TimetableArchive::load(&*store).unwrap_or_else(|e| {
            log::warn!("Failed to load saved timetables: {:#}", e);
            TimetableArchive::default()
        });
        log::info!(
            "Loaded {} classes and {} saved timetables",
            timetable.len(),
            archive.entries().len()
        );

        Self {
            store,
            layout: GridLayout::new(settings.grid),
            drag: DragController::new(&settings),
            settings,
            timetable,
            archive,
            canvas: None,
            status: None,
        }
    }

    pub(super) fn handle_update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Menu and status bar first so the central panel gets what is left
        self.render_menu_bar(ctx);
        self.render_status_bar(ctx);
        self.render_agenda(ctx);
        self.render_main_panel(ctx);
        self.render_details(ctx);
        self.handle_pointer(ctx);
    }

    /// Write the current classes and the archive back to the store
    pub(super) fn persist(&mut self) {
        if let Err(e) = self.timetable.save(&mut *self.store) {
            log::error!("Failed to save timetable: {:#}", e);
            self.status = Some("Could not save the timetable".to_string());
        }
        if let Err(e) = self.archive.save(&mut *self.store) {
            log::error!("Failed to save saved timetables: {:#}", e);
            self.status = Some("Could not save the timetable archive".to_string());
        }
    }

    pub(super) fn start_new_timetable(&mut self) {
        self.drag.cancel();
        self.status = Some(match self.archive.archive_current(&mut self.timetable, Local::now()) {
            Some(name) => format!("Timetable saved as \"{}\". Starting a new timetable.", name),
            None => "New empty timetable created".to_string(),
        });
        self.persist();
    }
}

fn database_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "Schedulr", "Schedulr")
        .context("No home directory for application data")?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    Ok(data_dir.join(DATABASE_FILE_NAME))
}

fn open_database() -> Result<Database> {
    let path = database_path()?;
    let db = Database::new(&path.to_string_lossy())?;
    db.initialize_schema()?;
    log::info!("Using database at {}", path.display());
    Ok(db)
}

/// The on-disk database, or a memory store when it cannot be opened
fn open_store() -> Box<dyn KeyValueStore> {
    match open_database() {
        Ok(db) => Box::new(db),
        Err(e) => {
            log::error!("Failed to open database: {:#}. Changes will not be kept.", e);
            Box::new(MemoryStore::new())
        }
    }
}
