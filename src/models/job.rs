//! Job (shoot) model and embedded gear reservations

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{AppError, AppResult};

pub const DEFAULT_JOB_TITLE: &str = "New Job";

/// A claim on units of one equipment item for the job's date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Reservation {
    pub equipment_id: String,
    /// Units requested (at least 1)
    pub quantity: u32,
    /// Packing checklist state
    #[serde(default)]
    pub packed: bool,
}

impl Reservation {
    pub fn new(equipment_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            equipment_id: equipment_id.into(),
            quantity: quantity.max(1),
            packed: false,
        }
    }
}

/// A scheduled engagement on a single calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Job {
    pub id: String,
    /// Day of the job (no time-of-day component)
    pub date: NaiveDate,
    pub title: String,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    /// One entry per distinct equipment id
    #[serde(default)]
    pub gear: Vec<Reservation>,
}

impl Job {
    /// Empty job with the default title
    pub fn new(id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            date,
            title: DEFAULT_JOB_TITLE.to_string(),
            location: None,
            price: None,
            description: None,
            gear: Vec::new(),
        }
    }

    /// Reservation for an equipment id, if any
    pub fn reservation(&self, equipment_id: &str) -> Option<&Reservation> {
        self.gear.iter().find(|g| g.equipment_id == equipment_id)
    }

    /// Total units reserved across all gear entries (saturating)
    pub fn reserved_units(&self) -> u32 {
        self.gear
            .iter()
            .fold(0u32, |total, g| total.saturating_add(g.quantity))
    }
}

/// Create job request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateJob {
    /// Optional client-chosen id; generated when absent
    pub id: Option<String>,
    /// Job date (YYYY-MM-DD)
    pub date: NaiveDate,
    pub title: Option<String>,
    pub location: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
    pub description: Option<String>,
    pub gear: Option<Vec<Reservation>>,
}

/// Update job request (field-level patch; `gear` replaces the whole list)
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateJob {
    pub date: Option<NaiveDate>,
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub location: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
    pub description: Option<String>,
    pub gear: Option<Vec<Reservation>>,
}

/// Query parameters for jobs
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct JobQuery {
    /// Exact job date (YYYY-MM-DD)
    pub date: Option<String>,
    /// Calendar month (YYYY-MM)
    pub month: Option<String>,
    /// Jobs from this date (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Jobs until this date (YYYY-MM-DD)
    pub end_date: Option<String>,
}

/// Add gear request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddGear {
    #[validate(length(min = 1, message = "Equipment id is required"))]
    pub equipment_id: String,
}

/// Set reservation quantity request; values below 1 are clamped to 1
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetGearQuantity {
    pub quantity: i64,
}

/// Parse a `YYYY-MM-DD` date, naming the offending field on failure
pub fn parse_date(value: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid {}: expected YYYY-MM-DD", field)))
}

/// First and last day of a `YYYY-MM` month
pub fn parse_month(value: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid month: expected YYYY-MM".to_string()))?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| AppError::Validation("Month out of range".to_string()))?;
    Ok((first, last))
}

impl JobQuery {
    /// Inclusive date bounds implied by the filters; the narrowest wins
    pub fn date_range(&self) -> AppResult<(Option<NaiveDate>, Option<NaiveDate>)> {
        let mut start = self.start_date.as_deref().map(|s| parse_date(s, "start_date")).transpose()?;
        let mut end = self.end_date.as_deref().map(|s| parse_date(s, "end_date")).transpose()?;

        let mut narrow = |from: NaiveDate, to: NaiveDate| {
            start = Some(start.map_or(from, |s| s.max(from)));
            end = Some(end.map_or(to, |e| e.min(to)));
        };

        if let Some(month) = self.month.as_deref() {
            let (first, last) = parse_month(month)?;
            narrow(first, last);
        }
        if let Some(date) = self.date.as_deref() {
            let day = parse_date(date, "date")?;
            narrow(day, day);
        }

        Ok((start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-02").unwrap(), (ymd(2024, 2, 1), ymd(2024, 2, 29)));
        assert_eq!(parse_month("2023-12").unwrap(), (ymd(2023, 12, 1), ymd(2023, 12, 31)));
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("May").is_err());
    }

    #[test]
    fn test_date_range_combines_filters() {
        let query = JobQuery {
            month: Some("2024-05".into()),
            start_date: Some("2024-05-10".into()),
            ..Default::default()
        };
        assert_eq!(query.date_range().unwrap(), (Some(ymd(2024, 5, 10)), Some(ymd(2024, 5, 31))));

        let query = JobQuery {
            date: Some("2024-05-01".into()),
            ..Default::default()
        };
        assert_eq!(query.date_range().unwrap(), (Some(ymd(2024, 5, 1)), Some(ymd(2024, 5, 1))));

        assert_eq!(JobQuery::default().date_range().unwrap(), (None, None));
    }

    #[test]
    fn test_date_range_rejects_bad_dates() {
        let query = JobQuery {
            end_date: Some("01/05/2024".into()),
            ..Default::default()
        };
        assert!(matches!(query.date_range(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_reservation_defaults_packed() {
        let r: Reservation = serde_json::from_str(r#"{"equipment_id":"cam1","quantity":2}"#).unwrap();
        assert!(!r.packed);
        assert_eq!(Reservation::new("cam1", 0).quantity, 1);
    }
}
