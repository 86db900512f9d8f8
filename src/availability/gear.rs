//! Reservation editing and packing checklist
//!
//! Edits never mutate the job they are given: each returns a new `Job`, and
//! the caller replaces its baseline with the result.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::job::{Job, Reservation};

/// Add one unit of `equipment_id` to the job.
///
/// Increments the existing reservation if there is one, otherwise appends
/// `{equipment_id, quantity: 1, packed: false}`.
pub fn add_reservation(job: &Job, equipment_id: &str) -> Job {
    let mut next = job.clone();
    match next.gear.iter_mut().find(|g| g.equipment_id == equipment_id) {
        Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
        None => next.gear.push(Reservation::new(equipment_id, 1)),
    }
    next
}

/// Set the quantity of an existing reservation, clamped to at least 1.
///
/// No upper bound: overbooking is representable and only reported.
pub fn set_quantity(job: &Job, equipment_id: &str, requested: i64) -> Job {
    let quantity = requested.clamp(1, i64::from(u32::MAX)) as u32;
    update_matching(job, equipment_id, |g| g.quantity = quantity)
}

/// Flip the packed flag of a reservation
pub fn toggle_packed(job: &Job, equipment_id: &str) -> Job {
    update_matching(job, equipment_id, |g| g.packed = !g.packed)
}

/// Drop the reservation for `equipment_id`, keeping the order of the rest
pub fn remove_reservation(job: &Job, equipment_id: &str) -> Job {
    let mut next = job.clone();
    next.gear.retain(|g| g.equipment_id != equipment_id);
    next
}

fn update_matching(job: &Job, equipment_id: &str, apply: impl FnOnce(&mut Reservation)) -> Job {
    let mut next = job.clone();
    if let Some(g) = next.gear.iter_mut().find(|g| g.equipment_id == equipment_id) {
        apply(g);
    }
    next
}

/// Enforce gear invariants on a list supplied from outside.
///
/// Duplicate equipment ids are merged into the first occurrence (quantities
/// summed, packed if any duplicate was packed) and quantities are raised to 1.
pub fn normalize_gear(gear: Vec<Reservation>) -> Vec<Reservation> {
    let mut merged: Vec<Reservation> = Vec::with_capacity(gear.len());
    for entry in gear {
        match merged.iter_mut().find(|g| g.equipment_id == entry.equipment_id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(entry.quantity.max(1));
                existing.packed |= entry.packed;
            }
            None => merged.push(Reservation {
                quantity: entry.quantity.max(1),
                ..entry
            }),
        }
    }
    merged
}

/// Overall packing state of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PackingStatus {
    /// No gear assigned
    None,
    /// Nothing packed yet
    Pending,
    /// Some entries packed
    Partial,
    /// Every entry packed
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PackingSummary {
    /// Number of gear entries
    pub items: usize,
    /// Number of packed entries
    pub packed: usize,
    /// Total units reserved
    pub units: u32,
    pub status: PackingStatus,
}

pub fn packing_summary(job: &Job) -> PackingSummary {
    let items = job.gear.len();
    let packed = job.gear.iter().filter(|g| g.packed).count();
    let status = if items == 0 {
        PackingStatus::None
    } else if packed == items {
        PackingStatus::Complete
    } else if packed == 0 {
        PackingStatus::Pending
    } else {
        PackingStatus::Partial
    };

    PackingSummary {
        items,
        packed,
        units: job.reserved_units(),
        status,
    }
}
