/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - token 検証器と各 service (repo は service の中に閉じ込める)
 * - Clone 前提で持つ (中身は全部 Arc)
 */
use std::sync::Arc;

use sqlx::PgPool;

use crate::repos::{PgTodoListRepo, PgTodoRepo, PgUserRepo, TodoListRepo, TodoRepo, UserRepo};
use crate::services::auth::{PasswordHasher, TokenService};
use crate::services::{TodoListService, TodoService, UserService};

#[derive(Clone, Debug)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub users: Arc<UserService>,
    pub lists: Arc<TodoListService>,
    pub todos: Arc<TodoService>,
}

impl AppState {
    pub fn new(
        tokens: Arc<TokenService>,
        hasher: Arc<dyn PasswordHasher>,
        users: Arc<dyn UserRepo>,
        lists: Arc<dyn TodoListRepo>,
        todos: Arc<dyn TodoRepo>,
    ) -> Self {
        Self {
            users: Arc::new(UserService::new(users, hasher, Arc::clone(&tokens))),
            lists: Arc::new(TodoListService::new(Arc::clone(&lists), Arc::clone(&todos))),
            todos: Arc::new(TodoService::new(todos, lists)),
            tokens,
        }
    }

    /// Postgres-backed state for the running server.
    pub fn with_pool(
        pool: PgPool,
        tokens: Arc<TokenService>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self::new(
            tokens,
            hasher,
            Arc::new(PgUserRepo::new(pool.clone())),
            Arc::new(PgTodoListRepo::new(pool.clone())),
            Arc::new(PgTodoRepo::new(pool)),
        )
    }
}

#[cfg(test)]
impl AppState {
    pub fn in_memory(store: &crate::repos::memory::MemoryStore, tokens: Arc<TokenService>) -> Self {
        Self::new(
            tokens,
            Arc::new(crate::services::auth::BcryptHasher::new(4)),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
        )
    }
}
