//! Exoplanet catalog explorer: habitability scoring, filtering, statistics
//! and CSV export, with an egui front end.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
