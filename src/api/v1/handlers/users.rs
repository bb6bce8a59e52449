/*
 * Responsibility
 * - /users/me (自分自身のみ。他人の user を触る route は無い)
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::users::{UpdateUserRequest, UserResponse},
        extractors::{ApiJson, CurrentUser},
    },
    error::AppError,
    state::AppState,
};

pub async fn get_me(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
) -> Result<Json<UserResponse>, AppError> {
    let row = state.users.get(me.id, me.id).await?;
    Ok(Json(row.into()))
}

pub async fn update_me(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let row = state.users.update(me.id, me.id, req.into()).await?;
    Ok(Json(row.into()))
}

pub async fn delete_me(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
) -> Result<StatusCode, AppError> {
    state.users.delete(me.id, me.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
