//! In-memory repositories for service and router tests.
//!
//! One store backs all three traits so the FK cascades of the real schema
//! (user -> lists -> todos) can be mirrored.
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::todo_list_repo::{NewTodoList, TodoListChanges, TodoListRepo, TodoListRow};
use crate::repos::todo_repo::{NewTodo, TodoChanges, TodoRepo, TodoRow};
use crate::repos::user_repo::{NewUser, UserChanges, UserRepo, UserRow};

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<UserRow>,
    lists: Vec<TodoListRow>,
    todos: Vec<TodoRow>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn todo_count(&self) -> usize {
        self.lock().todos.len()
    }

    pub fn list_count(&self) -> usize {
        self.lock().lists.len()
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn fetch(&self, user_id: i64) -> RepoResult<Option<UserRow>> {
        Ok(self.lock().users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn fetch_by_email(&self, email: &str) -> RepoResult<Option<UserRow>> {
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: NewUser) -> RepoResult<i64> {
        let mut t = self.lock();
        if t.users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Conflict);
        }
        let id = t.next_id();
        let now = Utc::now();
        t.users.push(UserRow {
            id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn update_fields(&self, user_id: i64, changes: UserChanges) -> RepoResult<u64> {
        let mut t = self.lock();
        if let Some(email) = &changes.email
            && t.users.iter().any(|u| u.id != user_id && &u.email == email)
        {
            return Err(RepoError::Conflict);
        }
        let Some(user) = t.users.iter_mut().find(|u| u.id == user_id) else {
            return Ok(0);
        };
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        user.updated_at = Utc::now();
        Ok(1)
    }

    async fn delete(&self, user_id: i64) -> RepoResult<u64> {
        let mut t = self.lock();
        let before = t.users.len();
        t.users.retain(|u| u.id != user_id);
        t.lists.retain(|l| l.user_id != user_id);
        t.todos.retain(|todo| todo.user_id != user_id);
        Ok((before - t.users.len()) as u64)
    }
}

#[async_trait]
impl TodoListRepo for MemoryStore {
    async fn fetch(&self, list_id: i64) -> RepoResult<Option<TodoListRow>> {
        Ok(self.lock().lists.iter().find(|l| l.id == list_id).cloned())
    }

    async fn fetch_all_by_owner(&self, owner_id: i64) -> RepoResult<Vec<TodoListRow>> {
        Ok(self
            .lock()
            .lists
            .iter()
            .filter(|l| l.user_id == owner_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, list: NewTodoList) -> RepoResult<i64> {
        let mut t = self.lock();
        let id = t.next_id();
        let now = Utc::now();
        t.lists.push(TodoListRow {
            id,
            user_id: list.user_id,
            title: list.title,
            description: list.description,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn update_fields(&self, list_id: i64, changes: TodoListChanges) -> RepoResult<u64> {
        let mut t = self.lock();
        let Some(list) = t.lists.iter_mut().find(|l| l.id == list_id) else {
            return Ok(0);
        };
        if let Some(title) = changes.title {
            list.title = title;
        }
        if let Some(description) = changes.description {
            list.description = description;
        }
        list.updated_at = Utc::now();
        Ok(1)
    }

    async fn delete(&self, list_id: i64) -> RepoResult<u64> {
        let mut t = self.lock();
        let before = t.lists.len();
        t.lists.retain(|l| l.id != list_id);
        t.todos.retain(|todo| todo.list_id != Some(list_id));
        Ok((before - t.lists.len()) as u64)
    }
}

#[async_trait]
impl TodoRepo for MemoryStore {
    async fn fetch(&self, todo_id: i64) -> RepoResult<Option<TodoRow>> {
        Ok(self.lock().todos.iter().find(|t| t.id == todo_id).cloned())
    }

    async fn fetch_all_by_owner(&self, owner_id: i64) -> RepoResult<Vec<TodoRow>> {
        Ok(self
            .lock()
            .todos
            .iter()
            .filter(|t| t.user_id == owner_id)
            .cloned()
            .collect())
    }

    async fn fetch_all_by_list(&self, list_id: i64) -> RepoResult<Vec<TodoRow>> {
        Ok(self
            .lock()
            .todos
            .iter()
            .filter(|t| t.list_id == Some(list_id))
            .cloned()
            .collect())
    }

    async fn insert(&self, todo: NewTodo) -> RepoResult<i64> {
        let mut t = self.lock();
        let id = t.next_id();
        let now = Utc::now();
        t.todos.push(TodoRow {
            id,
            user_id: todo.user_id,
            list_id: todo.list_id,
            title: todo.title,
            description: todo.description,
            done: todo.done,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn update_fields(&self, todo_id: i64, changes: TodoChanges) -> RepoResult<u64> {
        let mut t = self.lock();
        let Some(todo) = t.todos.iter_mut().find(|t| t.id == todo_id) else {
            return Ok(0);
        };
        if let Some(title) = changes.title {
            todo.title = title;
        }
        if let Some(description) = changes.description {
            todo.description = description;
        }
        if let Some(done) = changes.done {
            todo.done = done;
        }
        if let Some(list_id) = changes.list_id {
            todo.list_id = list_id;
        }
        todo.updated_at = Utc::now();
        Ok(1)
    }

    async fn delete(&self, todo_id: i64) -> RepoResult<u64> {
        let mut t = self.lock();
        let before = t.todos.len();
        t.todos.retain(|todo| todo.id != todo_id);
        Ok((before - t.todos.len()) as u64)
    }
}
