/*
 * Responsibility
 * - todo_lists CRUD
 * - fetch は id のみで引く (所有者チェックは service 側の責務)
 * - user_id の FK (CASCADE) 前提で削除挙動を意識
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow)]
pub struct TodoListRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTodoList {
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TodoListChanges {
    pub title: Option<String>,
    // description tri-state:
    // - None: do not update
    // - Some(None): set NULL
    // - Some(Some(v)): set v
    pub description: Option<Option<String>>,
}

#[async_trait]
pub trait TodoListRepo: Send + Sync {
    async fn fetch(&self, list_id: i64) -> RepoResult<Option<TodoListRow>>;

    async fn fetch_all_by_owner(&self, owner_id: i64) -> RepoResult<Vec<TodoListRow>>;

    async fn insert(&self, list: NewTodoList) -> RepoResult<i64>;

    async fn update_fields(&self, list_id: i64, changes: TodoListChanges) -> RepoResult<u64>;

    // Todos in the list go with it (FK ON DELETE CASCADE).
    async fn delete(&self, list_id: i64) -> RepoResult<u64>;
}

#[derive(Clone, Debug)]
pub struct PgTodoListRepo {
    pool: PgPool,
}

impl PgTodoListRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoListRepo for PgTodoListRepo {
    async fn fetch(&self, list_id: i64) -> RepoResult<Option<TodoListRow>> {
        let row = sqlx::query_as::<_, TodoListRow>(
            r#"
            SELECT id, user_id, title, description, created_at, updated_at
            FROM todo_lists
            WHERE id = $1
            "#,
        )
        .bind(list_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn fetch_all_by_owner(&self, owner_id: i64) -> RepoResult<Vec<TodoListRow>> {
        let rows = sqlx::query_as::<_, TodoListRow>(
            r#"
            SELECT id, user_id, title, description, created_at, updated_at
            FROM todo_lists
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn insert(&self, list: NewTodoList) -> RepoResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO todo_lists (user_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(list.user_id)
        .bind(&list.title)
        .bind(list.description.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_fields(&self, list_id: i64, changes: TodoListChanges) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE todo_lists
            SET
                title = COALESCE($2, title),
                description = CASE
                    WHEN $3 = false THEN description
                    ELSE $4
                END,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(list_id)
        .bind(changes.title.as_deref())
        .bind(changes.description.is_some()) // $3: flag to set description
        .bind(changes.description.flatten()) // $4: new description value
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, list_id: i64) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM todo_lists
            WHERE id = $1
            "#,
        )
        .bind(list_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
