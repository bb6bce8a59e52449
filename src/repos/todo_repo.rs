/*
 * Responsibility
 * - todos CRUD
 * - list_id は任意 (todo_lists への FK, CASCADE)
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow)]
pub struct TodoRow {
    pub id: i64,
    pub user_id: i64,
    pub list_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTodo {
    pub user_id: i64,
    pub list_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub done: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub done: Option<bool>,
    pub list_id: Option<Option<i64>>,
}

#[async_trait]
pub trait TodoRepo: Send + Sync {
    async fn fetch(&self, todo_id: i64) -> RepoResult<Option<TodoRow>>;

    async fn fetch_all_by_owner(&self, owner_id: i64) -> RepoResult<Vec<TodoRow>>;

    async fn fetch_all_by_list(&self, list_id: i64) -> RepoResult<Vec<TodoRow>>;

    async fn insert(&self, todo: NewTodo) -> RepoResult<i64>;

    async fn update_fields(&self, todo_id: i64, changes: TodoChanges) -> RepoResult<u64>;

    async fn delete(&self, todo_id: i64) -> RepoResult<u64>;
}

#[derive(Clone, Debug)]
pub struct PgTodoRepo {
    pool: PgPool,
}

impl PgTodoRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepo for PgTodoRepo {
    async fn fetch(&self, todo_id: i64) -> RepoResult<Option<TodoRow>> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT
                id, user_id, list_id, title, description, done, created_at, updated_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(todo_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn fetch_all_by_owner(&self, owner_id: i64) -> RepoResult<Vec<TodoRow>> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT
                id, user_id, list_id, title, description, done, created_at, updated_at
            FROM todos
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn fetch_all_by_list(&self, list_id: i64) -> RepoResult<Vec<TodoRow>> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT
                id, user_id, list_id, title, description, done, created_at, updated_at
            FROM todos
            WHERE list_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(list_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn insert(&self, todo: NewTodo) -> RepoResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO todos (user_id, list_id, title, description, done)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(todo.user_id)
        .bind(todo.list_id)
        .bind(&todo.title)
        .bind(todo.description.as_deref())
        .bind(todo.done)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_fields(&self, todo_id: i64, changes: TodoChanges) -> RepoResult<u64> {
        // user_id is never part of an update.
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET
                title = COALESCE($2, title),
                description = CASE
                    WHEN $3 = false THEN description
                    ELSE $4
                END,
                done = COALESCE($5, done),
                list_id = CASE
                    WHEN $6 = false THEN list_id
                    ELSE $7
                END,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(todo_id)
        .bind(changes.title.as_deref())
        .bind(changes.description.is_some())
        .bind(changes.description.flatten())
        .bind(changes.done)
        .bind(changes.list_id.is_some())
        .bind(changes.list_id.flatten())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, todo_id: i64) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM todos
            WHERE id = $1
            "#,
        )
        .bind(todo_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
