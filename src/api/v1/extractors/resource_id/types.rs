/**
 * Responsibility
 *  - リソースごとの「意味付きID型」を宣言する
 *  - 新しいリソースを足す時はここにタグ型と alias を足す
 */
use super::core::ResourceId;

// todos
pub enum TodoTag {}
pub type TodoId = ResourceId<TodoTag>;

// todo lists
pub enum TodoListTag {}
pub type TodoListId = ResourceId<TodoListTag>;
