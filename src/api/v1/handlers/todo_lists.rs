/*
 * Responsibility
 * - /todo-lists 系 CRUD handler
 * - 所有者チェックは service 側。handler は caller の id を渡すだけ
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::{
            todo_lists::{CreateTodoListRequest, TodoListResponse, UpdateTodoListRequest},
            todos::TodoResponse,
        },
        extractors::{ApiJson, CurrentUser, TodoListId},
    },
    error::AppError,
    state::AppState,
};

pub async fn list_todo_lists(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
) -> Result<Json<Vec<TodoListResponse>>, AppError> {
    let rows = state.lists.list(me.id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn create_todo_list(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
    ApiJson(req): ApiJson<CreateTodoListRequest>,
) -> Result<(StatusCode, Json<TodoListResponse>), AppError> {
    let row = state.lists.create(me.id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_todo_list(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
    list_id: TodoListId,
) -> Result<Json<TodoListResponse>, AppError> {
    let row = state.lists.get(me.id, list_id.id).await?;
    Ok(Json(row.into()))
}

pub async fn update_todo_list(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
    list_id: TodoListId,
    ApiJson(req): ApiJson<UpdateTodoListRequest>,
) -> Result<Json<TodoListResponse>, AppError> {
    let row = state.lists.update(me.id, list_id.id, req.into()).await?;
    Ok(Json(row.into()))
}

pub async fn delete_todo_list(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
    list_id: TodoListId,
) -> Result<StatusCode, AppError> {
    state.lists.delete(me.id, list_id.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_todos_in_list(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
    list_id: TodoListId,
) -> Result<Json<Vec<TodoResponse>>, AppError> {
    let rows = state.lists.todos(me.id, list_id.id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
