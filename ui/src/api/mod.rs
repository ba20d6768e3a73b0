//! Data fetch layer: typed view models and one loader per backend endpoint.

pub mod client;
pub mod decode;
pub mod error;
pub mod models;
pub mod scripted;
pub mod state;

pub use client::{endpoints, ApiClient, HttpGet, HttpResponse, HttpTransport};
pub use error::FetchError;
pub use models::*;
pub use scripted::ScriptedTransport;
pub use state::LoadState;
