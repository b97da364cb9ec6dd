//! Shared UI crate for Channelscope: statistics, configuration, brand
//! highlighting and the Dioxus views used by the web and desktop launchers.

use dioxus::prelude::*;

pub mod core;
pub mod dashboard;
pub mod stats;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

pub use crate::core::config::DashboardConfig;
pub use dashboard::use_dashboard_provider;

/// Shared theme stylesheet, served as an asset on the web.
pub const THEME_CSS: Asset = asset!("/assets/theme/main.css");
