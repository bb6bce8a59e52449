/*
 * Responsibility
 * - /todos 系 CRUD handler
 * - 他人の todo は存在しないのと同じ (404)
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::todos::{CreateTodoRequest, TodoResponse, UpdateTodoRequest},
        extractors::{ApiJson, CurrentUser, TodoId},
    },
    error::AppError,
    state::AppState,
};

pub async fn list_todos(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
) -> Result<Json<Vec<TodoResponse>>, AppError> {
    let rows = state.todos.list(me.id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn create_todo(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
    ApiJson(req): ApiJson<CreateTodoRequest>,
) -> Result<(StatusCode, Json<TodoResponse>), AppError> {
    let row = state.todos.create(me.id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_todo(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
    todo_id: TodoId,
) -> Result<Json<TodoResponse>, AppError> {
    let row = state.todos.get(me.id, todo_id.id).await?;
    Ok(Json(row.into()))
}

pub async fn update_todo(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
    todo_id: TodoId,
    ApiJson(req): ApiJson<UpdateTodoRequest>,
) -> Result<Json<TodoResponse>, AppError> {
    let row = state.todos.update(me.id, todo_id.id, req.into()).await?;
    Ok(Json(row.into()))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
    todo_id: TodoId,
) -> Result<StatusCode, AppError> {
    state.todos.delete(me.id, todo_id.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
