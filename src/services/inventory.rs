//! Inventory summary: owned units, their value and how they split by status

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::equipment::{Equipment, EquipmentStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusUnits {
    pub status: EquipmentStatus,
    pub units: u64,
}

/// Totals over the whole catalog
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct InventorySummary {
    /// Catalog entries
    pub items: usize,
    /// Sum of `how_many`
    pub total_units: u64,
    /// Sum of `value * how_many`; entries without a value count as 0
    pub total_value: f64,
    /// Units per status, every status listed
    pub units_by_status: Vec<StatusUnits>,
}

pub fn summarize(equipment: &[Equipment]) -> InventorySummary {
    let units_by_status = EquipmentStatus::ALL
        .iter()
        .map(|status| StatusUnits {
            status: *status,
            units: equipment
                .iter()
                .filter(|e| e.status == *status)
                .map(|e| u64::from(e.how_many))
                .sum(),
        })
        .collect();

    InventorySummary {
        items: equipment.len(),
        total_units: equipment.iter().map(|e| u64::from(e.how_many)).sum(),
        total_value: equipment
            .iter()
            .map(|e| e.value.unwrap_or(0.0) * f64::from(e.how_many))
            .sum(),
        units_by_status,
    }
}
