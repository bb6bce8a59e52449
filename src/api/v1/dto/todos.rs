use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;

use crate::repos::todo_repo::TodoRow;
use crate::services::todos::{TodoDraft, TodoPatch};

/// Any `user_id` in the body is ignored; the owner is always the caller.
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub list_id: Option<i64>,
    #[serde(default)]
    pub done: bool,
}

impl From<CreateTodoRequest> for TodoDraft {
    fn from(req: CreateTodoRequest) -> Self {
        TodoDraft {
            title: req.title,
            description: req.description,
            list_id: req.list_id,
            done: req.done,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    #[serde(default, with = "double_option")]
    pub description: Option<Option<String>>,
    pub done: Option<bool>,
    // null detaches the todo from its list
    #[serde(default, with = "double_option")]
    pub list_id: Option<Option<i64>>,
}

impl From<UpdateTodoRequest> for TodoPatch {
    fn from(req: UpdateTodoRequest) -> Self {
        TodoPatch {
            title: req.title,
            description: req.description,
            done: req.done,
            list_id: req.list_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: i64,
    pub user_id: i64,
    pub list_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TodoRow> for TodoResponse {
    fn from(row: TodoRow) -> Self {
        TodoResponse {
            id: row.id,
            user_id: row.user_id,
            list_id: row.list_id,
            title: row.title,
            description: row.description,
            done: row.done,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
