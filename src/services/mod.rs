// Service module exports

pub mod database;
pub mod layout;
pub mod overlap;
pub mod settings;
pub mod storage;
pub mod timetable;
