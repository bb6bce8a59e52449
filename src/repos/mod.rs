/*
 * Responsibility
 * - storage 層の公開インターフェース (trait + Postgres 実装)
 * - service は Arc<dyn ...Repo> だけを見る
 */
pub mod error;
#[cfg(test)]
pub mod memory;
pub mod todo_list_repo;
pub mod todo_repo;
pub mod user_repo;

pub use error::{RepoError, RepoResult};
pub use todo_list_repo::{PgTodoListRepo, TodoListRepo};
pub use todo_repo::{PgTodoRepo, TodoRepo};
pub use user_repo::{PgUserRepo, UserRepo};
