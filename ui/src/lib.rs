//! Shared UI crate for Sinergi, the innovation-collaboration dashboard.
//! Data access, views, and the PDF report pipeline live here; the web and
//! desktop crates only own routing and platform launch.

pub mod api;
pub mod core;
pub mod i18n;
pub mod recommendations;
pub mod report;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub mod charts;
    pub mod selector;

    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
    pub use charts::{ColumnChart, HorizontalBars, TrendChart};
    pub use selector::SearchableSelect;
}
