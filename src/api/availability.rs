//! Availability and calendar endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::job::parse_date,
    services::availability::{AvailabilityReport, CalendarMonth},
};

/// Availability query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    /// Equipment to check
    pub equipment_id: String,
    /// Date (YYYY-MM-DD)
    pub date: String,
    /// Job being edited; its own reservation is not counted
    pub exclude_job_id: Option<String>,
}

/// Calendar query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CalendarQuery {
    /// Month (YYYY-MM), defaults to the current month
    pub month: Option<String>,
}

/// Units of one equipment item free on a date
#[utoipa::path(
    get,
    path = "/availability",
    tag = "availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Availability report", body = AvailabilityReport),
        (status = 400, description = "Invalid date")
    )
)]
pub async fn get_availability(
    State(state): State<crate::AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityReport>> {
    let date = parse_date(&query.date, "date")?;
    let report = state.services.availability.query(
        &query.equipment_id,
        date,
        query.exclude_job_id.as_deref(),
    );
    Ok(Json(report))
}

/// Jobs of a month, day by day
#[utoipa::path(
    get,
    path = "/calendar",
    tag = "availability",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Month calendar", body = CalendarMonth),
        (status = 400, description = "Invalid month")
    )
)]
pub async fn get_calendar(
    State(state): State<crate::AppState>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<CalendarMonth>> {
    let month = query
        .month
        .unwrap_or_else(|| Utc::now().format("%Y-%m").to_string());
    let calendar = state.services.availability.calendar(&month)?;
    Ok(Json(calendar))
}
