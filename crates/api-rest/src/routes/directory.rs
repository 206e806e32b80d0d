//! Patients, doctors and staff.

use api_shared::{DoctorListRes, ListQuery, ListRes, PatientListRes, StaffListRes};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use clinic_core::components::directory::{Doctor, Patient, Staff};

use crate::error::ApiResult;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/patients",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of matching patients", body = PatientListRes),
        (status = 401, description = "Missing or unknown token", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ListRes<Patient>>> {
    state.authorize(&headers)?;
    let page = state.page_request(&query)?;
    let patients = state.services.directory.list_patients(query.query(), page)?;
    Ok(Json(patients.into()))
}

#[utoipa::path(
    get,
    path = "/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The patient", body = Patient),
        (status = 404, description = "No such patient", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<Patient>> {
    state.authorize(&headers)?;
    Ok(Json(state.services.directory.get_patient(&id)?))
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = Patient,
    responses(
        (status = 201, description = "Patient created", body = Patient),
        (status = 409, description = "Id already in use", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(patient): Json<Patient>,
) -> ApiResult<(StatusCode, Json<Patient>)> {
    state.authorize(&headers)?;
    let patient = state.services.directory.create_patient(patient)?;
    Ok((StatusCode::CREATED, Json(patient)))
}

#[utoipa::path(
    get,
    path = "/doctors",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of matching doctors", body = DoctorListRes),
        (status = 401, description = "Missing or unknown token", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ListRes<Doctor>>> {
    state.authorize(&headers)?;
    let page = state.page_request(&query)?;
    let doctors = state.services.directory.list_doctors(query.query(), page)?;
    Ok(Json(doctors.into()))
}

#[utoipa::path(
    get,
    path = "/doctors/{id}",
    params(("id" = String, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "The doctor", body = Doctor),
        (status = 404, description = "No such doctor", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<Doctor>> {
    state.authorize(&headers)?;
    Ok(Json(state.services.directory.get_doctor(&id)?))
}

#[utoipa::path(
    post,
    path = "/doctors",
    request_body = Doctor,
    responses(
        (status = 201, description = "Doctor created", body = Doctor),
        (status = 409, description = "Id already in use", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(doctor): Json<Doctor>,
) -> ApiResult<(StatusCode, Json<Doctor>)> {
    state.authorize(&headers)?;
    let doctor = state.services.directory.create_doctor(doctor)?;
    Ok((StatusCode::CREATED, Json(doctor)))
}

#[utoipa::path(
    get,
    path = "/staff",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of matching staff", body = StaffListRes),
        (status = 401, description = "Missing or unknown token", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_staff(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ListRes<Staff>>> {
    state.authorize(&headers)?;
    let page = state.page_request(&query)?;
    let staff = state.services.directory.list_staff(query.query(), page)?;
    Ok(Json(staff.into()))
}

#[utoipa::path(
    get,
    path = "/staff/{id}",
    params(("id" = String, Path, description = "Staff id")),
    responses(
        (status = 200, description = "The staff member", body = Staff),
        (status = 404, description = "No such staff member", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_staff(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<Staff>> {
    state.authorize(&headers)?;
    Ok(Json(state.services.directory.get_staff(&id)?))
}

#[utoipa::path(
    post,
    path = "/staff",
    request_body = Staff,
    responses(
        (status = 201, description = "Staff member created", body = Staff),
        (status = 409, description = "Id already in use", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn create_staff(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(staff): Json<Staff>,
) -> ApiResult<(StatusCode, Json<Staff>)> {
    state.authorize(&headers)?;
    let staff = state.services.directory.create_staff(staff)?;
    Ok((StatusCode::CREATED, Json(staff)))
}
