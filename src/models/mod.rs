//! Data models for Gearbook

pub mod equipment;
pub mod job;
pub mod snapshot;

// Re-export commonly used types
pub use equipment::{Equipment, EquipmentStatus};
pub use job::{Job, Reservation};
pub use snapshot::Snapshot;
