/*
 * Responsibility
 * - ドメインロジック (認証・所有者チェック・CRUD) の公開インターフェース
 * - handler は HTTP を、repo は SQL を知り、service はどちらも知らない
 */
pub mod auth;
pub mod error;
pub mod ownership;
pub mod todo_lists;
pub mod todos;
pub mod users;
pub mod validation;

pub use error::{DomainError, Resource, ServiceError, ServiceResult};
pub use todo_lists::TodoListService;
pub use todos::TodoService;
pub use users::UserService;
