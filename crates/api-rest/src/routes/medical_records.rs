//! Medical records and per-patient vitals.

use api_shared::{
    HealthCheckReq, LatestVitalsRes, ListQuery, ListRes, MedicalRecordListRes, SeriesRes,
    VitalsHistoryRes, VitalsQuery,
};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use clinic_core::components::prescription::MedicalRecord;
use clinic_core::components::vitals::{MetricKey, VitalsRecord};
use clinic_core::repositories::medical_records::NewMedicalRecord;

use crate::error::ApiResult;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/medical-records",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of matching records", body = MedicalRecordListRes),
        (status = 401, description = "Missing or unknown token", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_records(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ListRes<MedicalRecord>>> {
    state.authorize(&headers)?;
    let page = state.page_request(&query)?;
    let records = state.services.medical_records.list(
        query.query(),
        query.patient_id.as_deref(),
        page,
    )?;
    Ok(Json(records.into()))
}

#[utoipa::path(
    get,
    path = "/medical-records/{id}",
    params(("id" = String, Path, description = "Medical record id")),
    responses(
        (status = 200, description = "The record", body = MedicalRecord),
        (status = 404, description = "No such record", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<MedicalRecord>> {
    state.authorize(&headers)?;
    Ok(Json(state.services.medical_records.get(&id)?))
}

#[utoipa::path(
    post,
    path = "/medical-records",
    request_body = NewMedicalRecord,
    responses(
        (status = 201, description = "Record created", body = MedicalRecord),
        (status = 400, description = "Invalid prescription or diagnosis", body = api_shared::ErrorRes),
        (status = 403, description = "A doctor filing under another doctor", body = api_shared::ErrorRes),
        (status = 404, description = "Unknown patient or doctor", body = api_shared::ErrorRes)
    )
)]
/// Create a medical record. Prescription schedules are derived from the structured frequency.
#[axum::debug_handler]
pub async fn create_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<NewMedicalRecord>,
) -> ApiResult<(StatusCode, Json<MedicalRecord>)> {
    let (_token, user) = state.authorize(&headers)?;
    let record = state.services.medical_records.create(&user, req)?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/medical-records/vitals",
    params(VitalsQuery),
    responses(
        (status = 200, description = "Vitals history, most recent first", body = VitalsHistoryRes)
    )
)]
#[axum::debug_handler]
pub async fn vitals_history(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<VitalsQuery>,
) -> ApiResult<Json<VitalsHistoryRes>> {
    state.authorize(&headers)?;
    let records = state.services.vitals.history(&query.patient_id)?;
    Ok(Json(VitalsHistoryRes {
        patient_id: query.patient_id,
        records,
    }))
}

#[utoipa::path(
    post,
    path = "/medical-records/vitals",
    request_body = HealthCheckReq,
    responses(
        (status = 201, description = "Health check recorded as the newest vitals record"),
        (status = 400, description = "Empty value or empty submission", body = api_shared::ErrorRes),
        (status = 404, description = "Unknown patient", body = api_shared::ErrorRes),
        (status = 409, description = "A metric was entered twice", body = api_shared::ErrorRes)
    )
)]
/// Submit a manually entered health check.
#[axum::debug_handler]
pub async fn submit_health_check(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<HealthCheckReq>,
) -> ApiResult<(StatusCode, Json<VitalsRecord>)> {
    state.authorize(&headers)?;
    let date = req.date.unwrap_or_else(|| Utc::now().date_naive());
    let record = state
        .services
        .vitals
        .submit_health_check(&req.patient_id, &req.entries(), date)?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/medical-records/vitals/{patient_id}/latest",
    params(("patient_id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Latest vitals with units and range status", body = LatestVitalsRes)
    )
)]
#[axum::debug_handler]
pub async fn latest_vitals(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(patient_id): Path<String>,
) -> ApiResult<Json<LatestVitalsRes>> {
    state.authorize(&headers)?;
    let latest = state.services.vitals.latest(&patient_id)?;
    Ok(Json(LatestVitalsRes { latest }))
}

#[utoipa::path(
    get,
    path = "/medical-records/vitals/{patient_id}/series/{metric}",
    params(
        ("patient_id" = String, Path, description = "Patient id"),
        ("metric" = String, Path, description = "Metric key, e.g. `blood_pressure`")
    ),
    responses(
        (status = 200, description = "Chart series in history order", body = SeriesRes),
        (status = 400, description = "Unknown metric", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn metric_series(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((patient_id, metric)): Path<(String, String)>,
) -> ApiResult<Json<SeriesRes>> {
    state.authorize(&headers)?;
    let key: MetricKey = metric.parse()?;
    let series = state.services.vitals.series(&patient_id, key)?;
    Ok(Json(series.into()))
}
