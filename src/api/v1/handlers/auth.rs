/*
 * Responsibility
 * - /auth 系 handler (signup / login)
 * - DTO validation → services::auth 呼び出し
 * - token は login response の body でのみ返す
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::dto::auth::{LoginRequest, LoginResponse, SignUpRequest},
    error::AppError,
    services,
    state::AppState,
};

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<(StatusCode, &'static str), AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("VALIDATION", m))?;

    let message = services::auth::signup(&state.db, &req).await?;
    Ok((StatusCode::CREATED, message))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("VALIDATION", m))?;

    let jwt = services::auth::login(&state.db, &state.tokens, &req).await?;
    Ok(Json(LoginResponse {
        user_name_or_email: req.user_name_or_email,
        jwt,
    }))
}
