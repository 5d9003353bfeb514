pub mod calendar;
pub mod config;
