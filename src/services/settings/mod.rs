// Settings service
// Reads and writes schedulr.toml

mod service;

pub use service::{SettingsService, SETTINGS_FILE_NAME};
