//! Appointments. Listing and lookups are scoped to the caller's role.

use api_shared::{
    AppointmentListRes, LatestVitalsRes, ListQuery, ListRes, ParsedPrescription, StatusUpdateReq,
};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use clinic_core::components::appointment::Appointment;
use clinic_core::shaping::search::AppointmentTab;

use crate::error::ApiResult;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/appointments",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of appointments visible to the caller", body = AppointmentListRes),
        (status = 400, description = "Unknown tab or bad page size", body = api_shared::ErrorRes),
        (status = 401, description = "Missing or unknown token", body = api_shared::ErrorRes)
    )
)]
/// List appointments.
///
/// Doctors only see their own appointments. `tab` filters by status (`confirmed`, `pending`, ...)
/// or mode (`in-clinic`) and is combined with the free-text `q`.
#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ListRes<Appointment>>> {
    let (_token, user) = state.authorize(&headers)?;
    let tab = query
        .tab
        .as_deref()
        .map(str::parse::<AppointmentTab>)
        .transpose()?
        .unwrap_or_default();
    let page = state.page_request(&query)?;

    let appointments = state
        .services
        .appointments
        .list(&user, query.query(), tab, page)?;
    Ok(Json(appointments.into()))
}

#[utoipa::path(
    get,
    path = "/appointments/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "The appointment", body = Appointment),
        (status = 404, description = "No such appointment visible to the caller", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<Appointment>> {
    let (_token, user) = state.authorize(&headers)?;
    Ok(Json(state.services.appointments.get(&user, &id)?))
}

#[utoipa::path(
    post,
    path = "/appointments",
    request_body = Appointment,
    responses(
        (status = 201, description = "Appointment created", body = Appointment),
        (status = 400, description = "Missing patient or doctor", body = api_shared::ErrorRes),
        (status = 403, description = "A doctor booking for another doctor", body = api_shared::ErrorRes),
        (status = 409, description = "Id already in use", body = api_shared::ErrorRes)
    )
)]
/// Create an appointment. An empty `id` is replaced with a generated one.
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(appointment): Json<Appointment>,
) -> ApiResult<(StatusCode, Json<Appointment>)> {
    let (_token, user) = state.authorize(&headers)?;
    let appointment = state.services.appointments.create(&user, appointment)?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

#[utoipa::path(
    patch,
    path = "/appointments/{id}/status",
    params(("id" = String, Path, description = "Appointment id")),
    request_body = StatusUpdateReq,
    responses(
        (status = 200, description = "Status updated", body = Appointment),
        (status = 404, description = "No such appointment visible to the caller", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn update_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdateReq>,
) -> ApiResult<Json<Appointment>> {
    let (_token, user) = state.authorize(&headers)?;
    let appointment = state
        .services
        .appointments
        .update_status(&user, &id, req.status)?;
    Ok(Json(appointment))
}

#[utoipa::path(
    get,
    path = "/appointments/{id}/vitals/summary",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Latest vitals recorded for the appointment", body = LatestVitalsRes),
        (status = 404, description = "No such appointment visible to the caller", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn vitals_summary(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<LatestVitalsRes>> {
    let (_token, user) = state.authorize(&headers)?;
    let latest = state.services.appointments.vitals_summary(&user, &id)?;
    Ok(Json(LatestVitalsRes { latest }))
}

#[utoipa::path(
    get,
    path = "/appointments/{id}/previous-prescriptions",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Previous-visit prescriptions split into fields", body = Vec<ParsedPrescription>),
        (status = 404, description = "No such appointment visible to the caller", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn previous_prescriptions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<ParsedPrescription>>> {
    let (_token, user) = state.authorize(&headers)?;
    let parsed = state
        .services
        .appointments
        .previous_prescriptions(&user, &id)?
        .into_iter()
        .map(ParsedPrescription::from)
        .collect();
    Ok(Json(parsed))
}
