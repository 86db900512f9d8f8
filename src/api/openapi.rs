//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{availability, equipment, health, jobs, snapshot};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gearbook API",
        version = "1.0.0",
        description = "Equipment rental scheduling REST API",
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_inventory_summary,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Jobs
        jobs::list_jobs,
        jobs::get_job,
        jobs::create_job,
        jobs::update_job,
        jobs::delete_job,
        jobs::get_gear,
        jobs::add_gear,
        jobs::set_gear_quantity,
        jobs::remove_gear,
        jobs::toggle_packed,
        jobs::get_checklist,
        jobs::preview_job,
        // Availability
        availability::get_availability,
        availability::get_calendar,
        // Snapshot
        snapshot::get_snapshot,
        snapshot::stream_snapshot,
    ),
    components(
        schemas(
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentStatus,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::EquipmentQuery,
            crate::models::equipment::EquipmentSort,
            crate::models::equipment::SortOrder,
            crate::services::inventory::InventorySummary,
            crate::services::inventory::StatusUnits,
            // Jobs
            crate::models::job::Job,
            crate::models::job::Reservation,
            crate::models::job::CreateJob,
            crate::models::job::UpdateJob,
            crate::models::job::JobQuery,
            crate::models::job::AddGear,
            crate::models::job::SetGearQuantity,
            crate::services::jobs::JobGear,
            crate::services::jobs::Checklist,
            crate::availability::GearLine,
            crate::availability::PackingSummary,
            crate::availability::PackingStatus,
            // Availability
            availability::AvailabilityQuery,
            availability::CalendarQuery,
            crate::services::availability::AvailabilityReport,
            crate::services::availability::CalendarMonth,
            crate::services::availability::CalendarDay,
            crate::services::availability::CalendarEntry,
            // Snapshot
            crate::models::snapshot::Snapshot,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Gear inventory"),
        (name = "jobs", description = "Jobs, gear reservations and packing"),
        (name = "availability", description = "Availability and calendar"),
        (name = "snapshot", description = "Catalog/job snapshots and change stream")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_gear_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/jobs/{id}/gear/{equipment_id}"));
        assert!(doc.paths.paths.contains_key("/availability"));
        assert!(doc.paths.paths.contains_key("/equipment/summary"));
    }
}
