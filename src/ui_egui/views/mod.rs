pub mod palette;
pub mod time_grid;
