use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;

use crate::repos::todo_list_repo::TodoListRow;
use crate::services::todo_lists::{TodoListDraft, TodoListPatch};

/// Any `user_id` in the body is ignored; the owner is always the caller.
#[derive(Debug, Deserialize)]
pub struct CreateTodoListRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
}

impl From<CreateTodoListRequest> for TodoListDraft {
    fn from(req: CreateTodoListRequest) -> Self {
        TodoListDraft {
            title: req.title,
            description: req.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoListRequest {
    pub title: Option<String>,
    // missing: keep / null: clear / value: set
    #[serde(default, with = "double_option")]
    pub description: Option<Option<String>>,
}

impl From<UpdateTodoListRequest> for TodoListPatch {
    fn from(req: UpdateTodoListRequest) -> Self {
        TodoListPatch {
            title: req.title,
            description: req.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TodoListResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TodoListRow> for TodoListResponse {
    fn from(row: TodoListRow) -> Self {
        TodoListResponse {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
