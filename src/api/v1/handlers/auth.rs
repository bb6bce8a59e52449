/*
 * Responsibility
 * - POST /auth/signup, POST /auth/login (認証なしで token を発行する唯一の入口)
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::auth::{LoginRequest, SessionResponse, SignupRequest},
        extractors::ApiJson,
    },
    error::AppError,
    state::AppState,
};

pub async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let session = state.users.signup(req.into()).await?;
    Ok((StatusCode::CREATED, Json(session.into())))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.users.login(&req.email, &req.password).await?;
    Ok(Json(session.into()))
}
