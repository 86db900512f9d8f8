//! Gearbook
//!
//! Equipment rental scheduling server: a gear inventory, a calendar of shoot
//! jobs with per-job gear reservations and packing checklist, and per-date
//! availability accounting over both, served as a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod availability;
pub mod config;
pub mod error;
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
