//! Job and gear reservation endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::job::{AddGear, CreateJob, Job, JobQuery, SetGearQuantity, UpdateJob},
    services::jobs::{Checklist, JobGear},
};

/// List jobs
#[utoipa::path(
    get,
    path = "/jobs",
    tag = "jobs",
    params(JobQuery),
    responses(
        (status = 200, description = "Jobs ordered by date", body = Vec<Job>),
        (status = 400, description = "Invalid date filter")
    )
)]
pub async fn list_jobs(
    State(state): State<crate::AppState>,
    Query(query): Query<JobQuery>,
) -> AppResult<Json<Vec<Job>>> {
    let jobs = state.services.jobs.list(&query).await?;
    Ok(Json(jobs))
}

/// Get job by ID
#[utoipa::path(
    get,
    path = "/jobs/{id}",
    tag = "jobs",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job details", body = Job),
        (status = 404, description = "Job not found")
    )
)]
pub async fn get_job(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Job>> {
    let job = state.services.jobs.get_by_id(&id).await?;
    Ok(Json(job))
}

/// Create a job
#[utoipa::path(
    post,
    path = "/jobs",
    tag = "jobs",
    request_body = CreateJob,
    responses(
        (status = 201, description = "Job created", body = Job),
        (status = 409, description = "Job ID already in use")
    )
)]
pub async fn create_job(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateJob>,
) -> AppResult<(StatusCode, Json<Job>)> {
    let job = state.services.jobs.create(data).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// Update a job
#[utoipa::path(
    put,
    path = "/jobs/{id}",
    tag = "jobs",
    params(("id" = String, Path, description = "Job ID")),
    request_body = UpdateJob,
    responses(
        (status = 200, description = "Job updated", body = Job),
        (status = 404, description = "Job not found")
    )
)]
pub async fn update_job(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(data): Json<UpdateJob>,
) -> AppResult<Json<Job>> {
    let job = state.services.jobs.update(&id, data).await?;
    Ok(Json(job))
}

/// Delete a job
#[utoipa::path(
    delete,
    path = "/jobs/{id}",
    tag = "jobs",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn delete_job(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.jobs.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Gear of a job with per-item availability
#[utoipa::path(
    get,
    path = "/jobs/{id}/gear",
    tag = "jobs",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job gear", body = JobGear),
        (status = 404, description = "Job not found")
    )
)]
pub async fn get_gear(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<JobGear>> {
    let gear = state.services.jobs.gear(&id).await?;
    Ok(Json(gear))
}

/// Add one unit of equipment to a job
#[utoipa::path(
    post,
    path = "/jobs/{id}/gear",
    tag = "jobs",
    params(("id" = String, Path, description = "Job ID")),
    request_body = AddGear,
    responses(
        (status = 200, description = "Reservation added or incremented", body = JobGear),
        (status = 404, description = "Job or equipment not found")
    )
)]
pub async fn add_gear(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(data): Json<AddGear>,
) -> AppResult<Json<JobGear>> {
    data.validate()?;
    let gear = state.services.jobs.add_gear(&id, &data.equipment_id).await?;
    Ok(Json(gear))
}

/// Set the quantity of a reservation (minimum 1, overbooking allowed)
#[utoipa::path(
    put,
    path = "/jobs/{id}/gear/{equipment_id}",
    tag = "jobs",
    params(
        ("id" = String, Path, description = "Job ID"),
        ("equipment_id" = String, Path, description = "Equipment ID")
    ),
    request_body = SetGearQuantity,
    responses(
        (status = 200, description = "Quantity set", body = JobGear),
        (status = 404, description = "Job not found")
    )
)]
pub async fn set_gear_quantity(
    State(state): State<crate::AppState>,
    Path((id, equipment_id)): Path<(String, String)>,
    Json(data): Json<SetGearQuantity>,
) -> AppResult<Json<JobGear>> {
    let gear = state
        .services
        .jobs
        .set_gear_quantity(&id, &equipment_id, data.quantity)
        .await?;
    Ok(Json(gear))
}

/// Remove a reservation from a job
#[utoipa::path(
    delete,
    path = "/jobs/{id}/gear/{equipment_id}",
    tag = "jobs",
    params(
        ("id" = String, Path, description = "Job ID"),
        ("equipment_id" = String, Path, description = "Equipment ID")
    ),
    responses(
        (status = 200, description = "Reservation removed", body = JobGear),
        (status = 404, description = "Job not found")
    )
)]
pub async fn remove_gear(
    State(state): State<crate::AppState>,
    Path((id, equipment_id)): Path<(String, String)>,
) -> AppResult<Json<JobGear>> {
    let gear = state.services.jobs.remove_gear(&id, &equipment_id).await?;
    Ok(Json(gear))
}

/// Flip the packed flag of a reservation
#[utoipa::path(
    post,
    path = "/jobs/{id}/gear/{equipment_id}/packed",
    tag = "jobs",
    params(
        ("id" = String, Path, description = "Job ID"),
        ("equipment_id" = String, Path, description = "Equipment ID")
    ),
    responses(
        (status = 200, description = "Packed flag toggled", body = JobGear),
        (status = 404, description = "Job not found")
    )
)]
pub async fn toggle_packed(
    State(state): State<crate::AppState>,
    Path((id, equipment_id)): Path<(String, String)>,
) -> AppResult<Json<JobGear>> {
    let gear = state.services.jobs.toggle_packed(&id, &equipment_id).await?;
    Ok(Json(gear))
}

/// Packing checklist of a job
#[utoipa::path(
    get,
    path = "/jobs/{id}/checklist",
    tag = "jobs",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Packing checklist", body = Checklist),
        (status = 404, description = "Job not found")
    )
)]
pub async fn get_checklist(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Checklist>> {
    let checklist = state.services.jobs.checklist(&id).await?;
    Ok(Json(checklist))
}

/// Availability for a draft job that has not been saved
#[utoipa::path(
    post,
    path = "/jobs/preview",
    tag = "jobs",
    request_body = Job,
    responses(
        (status = 200, description = "Draft gear with availability", body = JobGear)
    )
)]
pub async fn preview_job(
    State(state): State<crate::AppState>,
    Json(draft): Json<Job>,
) -> Json<JobGear> {
    Json(state.services.jobs.preview(draft))
}
