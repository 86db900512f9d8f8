//! Equipment model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Equipment condition.
///
/// Informational only: a `Damaged` or `Unavailable` item still counts
/// with its full `how_many` when computing availability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "equipment_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentStatus {
    #[default]
    New,
    Old,
    Damaged,
    Unavailable,
}

impl EquipmentStatus {
    pub const ALL: [EquipmentStatus; 4] = [
        EquipmentStatus::New,
        EquipmentStatus::Old,
        EquipmentStatus::Damaged,
        EquipmentStatus::Unavailable,
    ];
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EquipmentStatus::New => "NEW",
            EquipmentStatus::Old => "OLD",
            EquipmentStatus::Damaged => "DAMAGED",
            EquipmentStatus::Unavailable => "UNAVAILABLE",
        };
        write!(f, "{}", label)
    }
}

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Equipment {
    pub id: String,
    /// Short display label (e.g. "A7 III")
    pub short_name: String,
    /// Full display label
    pub full_name: Option<String>,
    /// Total owned units, the capacity ceiling for reservations
    pub how_many: u32,
    pub status: EquipmentStatus,
    /// Known defects, in the order they were recorded
    pub defects: Vec<String>,
    /// Purchase value
    pub value: Option<f64>,
    pub buy_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl Equipment {
    /// Minimal entry with default status and no descriptive fields
    pub fn new(id: impl Into<String>, short_name: impl Into<String>, how_many: u32) -> Self {
        Self {
            id: id.into(),
            short_name: short_name.into(),
            full_name: None,
            how_many,
            status: EquipmentStatus::default(),
            defects: Vec::new(),
            value: None,
            buy_date: None,
            notes: None,
        }
    }
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    /// Optional client-chosen id; generated when absent
    pub id: Option<String>,
    #[validate(length(min = 1, message = "Short name is required"))]
    pub short_name: String,
    pub full_name: Option<String>,
    /// Number of units (defaults to 1)
    #[validate(range(min = 0, message = "Count cannot be negative"))]
    pub how_many: Option<i32>,
    pub status: Option<EquipmentStatus>,
    pub defects: Option<Vec<String>>,
    pub value: Option<f64>,
    pub buy_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Update equipment request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, message = "Short name cannot be empty"))]
    pub short_name: Option<String>,
    pub full_name: Option<String>,
    #[validate(range(min = 0, message = "Count cannot be negative"))]
    pub how_many: Option<i32>,
    pub status: Option<EquipmentStatus>,
    pub defects: Option<Vec<String>>,
    pub value: Option<f64>,
    pub buy_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Sortable equipment fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSort {
    #[default]
    ShortName,
    /// Purchase value, missing values sort as 0
    Value,
    HowMany,
    BuyDate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Inventory list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct EquipmentQuery {
    /// Case-insensitive text matched against short name, full name and notes
    pub search: Option<String>,
    pub status: Option<EquipmentStatus>,
    /// Sort field (short_name, value, how_many, buy_date)
    pub sort: Option<EquipmentSort>,
    /// asc or desc
    pub order: Option<SortOrder>,
}

impl EquipmentQuery {
    /// Search term as a LIKE pattern, `None` when blank
    pub fn search_pattern(&self) -> Option<String> {
        let term = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
        let escaped = term
            .to_lowercase()
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        Some(format!("%{}%", escaped))
    }

    /// ORDER BY clause; ties fall back to short name then id
    pub fn order_by(&self) -> String {
        let column = match self.sort.unwrap_or_default() {
            EquipmentSort::ShortName => "short_name",
            EquipmentSort::Value => "COALESCE(value, 0)",
            EquipmentSort::HowMany => "how_many",
            EquipmentSort::BuyDate => "buy_date",
        };
        let direction = match self.order.unwrap_or_default() {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        format!("{} {} NULLS LAST, short_name, id", column, direction)
    }
}
