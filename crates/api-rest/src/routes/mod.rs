//! Request handlers, one module per resource.

pub mod appointments;
pub mod auth;
pub mod dashboard;
pub mod directory;
pub mod medical_records;

use api_shared::{HealthRes, HealthService};
use axum::extract::State;
use axum::Json;

use crate::AppState;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API.
///
/// Open endpoint used for monitoring and load balancer health checks.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}
