// Schedulr
// Weekly timetable editor

use schedulr::ui_egui::TimetableApp;

fn main() -> eframe::Result {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Schedulr");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Schedulr")
            .with_inner_size([1200.0, 860.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Schedulr",
        options,
        Box::new(|cc| Ok(Box::new(TimetableApp::new(cc)))),
    )
}
