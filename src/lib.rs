//! Holdings & Availability Engine
//!
//! Resolves what a library catalog can show about an item's physical
//! holdings: which copies exist, where they are, which can be requested,
//! and what is lost or missing. Holdings come from the ILS over HTTP,
//! cached per request path; the engine weeds and orders them for display
//! and serves the result as a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod availability;
pub mod classifier;
pub mod config;
pub mod error;
pub mod firehose;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
