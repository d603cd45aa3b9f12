//! Single-user project tracking: a persisted project list, the counters and
//! progress chart derived from it, and the egui front end that drives it.

pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod io;
pub mod model;
pub mod ui;
pub mod view;
