//! Platform-agnostic building blocks shared by the dashboard views.

pub mod brands;
pub mod config;
pub mod format;
