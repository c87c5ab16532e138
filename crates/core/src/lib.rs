pub mod model;
pub mod parsers;
pub mod scale;
pub mod views;
