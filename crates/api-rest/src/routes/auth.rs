use api_shared::{LoginReq, LoginRes, LogoutRes};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use clinic_core::components::directory::User;

use crate::error::ApiResult;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Logged in", body = LoginRes),
        (status = 401, description = "Invalid email or password", body = api_shared::ErrorRes)
    )
)]
/// Exchange email and password for a bearer token.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginReq>,
) -> ApiResult<Json<LoginRes>> {
    let (token, user) = state.services.auth.login(&req.email, &req.password)?;
    Ok(Json(LoginRes { token, user }))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Session ended", body = LogoutRes),
        (status = 401, description = "Missing or unknown token", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Json<LogoutRes>> {
    let (token, _user) = state.authorize(&headers)?;
    let ok = state.services.auth.logout(&token)?;
    Ok(Json(LogoutRes { ok }))
}

#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "The logged-in user", body = User),
        (status = 401, description = "Missing or unknown token", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Json<User>> {
    let (_token, user) = state.authorize(&headers)?;
    Ok(Json(user))
}
