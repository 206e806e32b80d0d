use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use clinic_core::repositories::dashboard::DashboardStats;

use crate::error::ApiResult;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/dashboard/stats",
    responses(
        (status = 200, description = "Headline numbers for the caller", body = DashboardStats),
        (status = 401, description = "Missing or unknown token", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn stats(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Json<DashboardStats>> {
    let (_token, user) = state.authorize(&headers)?;
    let today = Utc::now().date_naive();
    Ok(Json(state.services.dashboard.stats(&user, today)?))
}
