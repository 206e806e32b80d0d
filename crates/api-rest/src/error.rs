//! HTTP error responses.

use api_shared::ErrorRes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use clinic_core::ClinicError;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// A status code and the message sent back as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn unauthorised(message: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ClinicError> for ApiError {
    fn from(err: ClinicError) -> Self {
        let status = match &err {
            ClinicError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ClinicError::NotFound { .. } => StatusCode::NOT_FOUND,
            ClinicError::DuplicateId { .. } | ClinicError::DuplicateMetric { .. } => {
                StatusCode::CONFLICT
            }
            ClinicError::InvalidCredentials | ClinicError::Unauthorised => {
                StatusCode::UNAUTHORIZED
            }
            ClinicError::Forbidden(_) => StatusCode::FORBIDDEN,
            ClinicError::LockPoisoned(_)
            | ClinicError::SeedRead(_)
            | ClinicError::SeedParse { .. } => {
                tracing::error!("Internal error: {:?}", err);
                return Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Internal error".into(),
                };
            }
        };

        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorRes {
                error: self.message,
            }),
        )
            .into_response()
    }
}
