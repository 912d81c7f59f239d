// Schedulr library
// Timetable model, grid math and the drag controller, shared by the app and tests

pub mod models;
pub mod services;
pub mod ui_egui;
pub mod utils;
