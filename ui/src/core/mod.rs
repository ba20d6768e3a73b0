//! Platform-agnostic building blocks shared by the data layer, views, and the report pipeline.

pub mod config;
pub mod format;
pub mod platform;
pub mod score;
pub mod timing;
