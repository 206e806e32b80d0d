//! # API REST
//!
//! REST API for the clinic records system.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - Bearer-token checks against the mock auth service
//! - OpenAPI/Swagger documentation
//!
//! Uses `api-shared` for wire types and `clinic-core` for everything else.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod routes;

use std::sync::Arc;

use api_shared::auth::bearer_token;
use api_shared::ListQuery;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum::routing::{get, patch, post};
use axum::Router;
use clinic_core::components::directory::User;
use clinic_core::constants::FIRST_PAGE;
use clinic_core::shaping::pagination::PageRequest;
use clinic_core::{ClinicServices, CoreConfig};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use error::{ApiError, ApiResult};
use routes::{appointments, auth, dashboard, directory, medical_records};

/// Application state for the REST API server.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<CoreConfig>,
    pub services: ClinicServices,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>, services: ClinicServices) -> Self {
        Self { cfg, services }
    }

    /// Resolves the request's bearer token to a user.
    ///
    /// # Errors
    ///
    /// Returns 401 if the header is missing, malformed, or names an unknown token.
    pub fn authorize(&self, headers: &HeaderMap) -> ApiResult<(String, User)> {
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| ApiError::unauthorised("Missing or invalid bearer token"))?;
        let user = self.services.auth.authenticate(token)?;
        Ok((token.to_string(), user))
    }

    /// Page request from the query string, falling back to the configured page size.
    pub fn page_request(&self, query: &ListQuery) -> ApiResult<PageRequest> {
        Ok(PageRequest::new(
            query.page.unwrap_or(FIRST_PAGE),
            query.limit.unwrap_or(self.cfg.default_page_limit()),
        )?)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health,
        auth::login,
        auth::logout,
        auth::me,
        directory::list_patients,
        directory::get_patient,
        directory::create_patient,
        directory::list_doctors,
        directory::get_doctor,
        directory::create_doctor,
        directory::list_staff,
        directory::get_staff,
        directory::create_staff,
        appointments::list_appointments,
        appointments::get_appointment,
        appointments::create_appointment,
        appointments::update_status,
        appointments::vitals_summary,
        appointments::previous_prescriptions,
        medical_records::list_records,
        medical_records::get_record,
        medical_records::create_record,
        medical_records::vitals_history,
        medical_records::submit_health_check,
        medical_records::latest_vitals,
        medical_records::metric_series,
        dashboard::stats,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::ErrorRes,
        api_shared::LoginReq,
        api_shared::LoginRes,
        api_shared::LogoutRes,
        api_shared::PatientListRes,
        api_shared::DoctorListRes,
        api_shared::StaffListRes,
        api_shared::AppointmentListRes,
        api_shared::MedicalRecordListRes,
        api_shared::StatusUpdateReq,
        api_shared::VitalsHistoryRes,
        api_shared::MetricEntry,
        api_shared::HealthCheckReq,
        api_shared::LatestVitalsRes,
        api_shared::SeriesRes,
        api_shared::ParsedPrescription,
        clinic_core::components::directory::ContactDetails,
        clinic_core::components::directory::Patient,
        clinic_core::components::directory::PatientStatus,
        clinic_core::components::directory::Doctor,
        clinic_core::components::directory::DoctorAvailability,
        clinic_core::components::directory::Staff,
        clinic_core::components::directory::StaffStatus,
        clinic_core::components::directory::User,
        clinic_core::components::directory::UserRole,
        clinic_core::components::appointment::Appointment,
        clinic_core::components::appointment::AppointmentType,
        clinic_core::components::appointment::AppointmentStatus,
        clinic_core::components::appointment::AppointmentMode,
        clinic_core::components::appointment::PatientRef,
        clinic_core::components::appointment::DoctorRef,
        clinic_core::components::appointment::PreviousVisit,
        clinic_core::components::prescription::MedicalRecord,
        clinic_core::components::prescription::Prescription,
        clinic_core::components::prescription::TimeOfDay,
        clinic_core::components::prescription::FoodInstruction,
        clinic_core::components::vitals::MetricKey,
        clinic_core::repositories::medical_records::NewMedicalRecord,
        clinic_core::repositories::medical_records::PrescriptionForm,
        clinic_core::repositories::vitals::VitalsSummary,
        clinic_core::repositories::vitals::MetricReading,
        clinic_core::repositories::dashboard::DashboardStats,
        clinic_core::shaping::pagination::Pagination,
        clinic_core::shaping::ranges::RangeStatus,
    ))
)]
pub struct ApiDoc;

/// Builds the full router: API routes, Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route(
            "/patients",
            get(directory::list_patients).post(directory::create_patient),
        )
        .route("/patients/:id", get(directory::get_patient))
        .route(
            "/doctors",
            get(directory::list_doctors).post(directory::create_doctor),
        )
        .route("/doctors/:id", get(directory::get_doctor))
        .route(
            "/staff",
            get(directory::list_staff).post(directory::create_staff),
        )
        .route("/staff/:id", get(directory::get_staff))
        .route(
            "/appointments",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route("/appointments/:id", get(appointments::get_appointment))
        .route("/appointments/:id/status", patch(appointments::update_status))
        .route(
            "/appointments/:id/vitals/summary",
            get(appointments::vitals_summary),
        )
        .route(
            "/appointments/:id/previous-prescriptions",
            get(appointments::previous_prescriptions),
        )
        .route(
            "/medical-records",
            get(medical_records::list_records).post(medical_records::create_record),
        )
        .route(
            "/medical-records/vitals",
            get(medical_records::vitals_history).post(medical_records::submit_health_check),
        )
        .route(
            "/medical-records/vitals/:patient_id/latest",
            get(medical_records::latest_vitals),
        )
        .route(
            "/medical-records/vitals/:patient_id/series/:metric",
            get(medical_records::metric_series),
        )
        .route("/medical-records/:id", get(medical_records::get_record))
        .route("/dashboard/stats", get(dashboard::stats))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
