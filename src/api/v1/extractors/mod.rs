pub mod auth_ctx;
pub mod json;
pub mod resource_id;

pub use auth_ctx::{CurrentUser, RequestContext};
pub use json::ApiJson;
pub use resource_id::{TodoId, TodoListId};
