//! API handlers for Gearbook REST endpoints

pub mod availability;
pub mod equipment;
pub mod health;
pub mod jobs;
pub mod openapi;
pub mod snapshot;
