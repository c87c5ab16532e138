pub mod shift_grid;
pub mod time_axis;
