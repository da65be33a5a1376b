pub mod cells;
pub mod config;
