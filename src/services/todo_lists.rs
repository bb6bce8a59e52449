/*
 * Responsibility
 * - todo list の CRUD (呼び出し元 user id を常に明示的に受け取る)
 * - create は user_id を caller で上書きする
 * - get/update/delete は OwnershipGuard 経由 (他人のものは NotFound)
 */
use std::sync::Arc;

use crate::repos::todo_list_repo::{NewTodoList, TodoListChanges, TodoListRepo, TodoListRow};
use crate::repos::todo_repo::{TodoRepo, TodoRow};
use crate::services::error::{DomainError, Resource, ServiceResult};
use crate::services::ownership::OwnershipGuard;
use crate::services::validation;

pub(crate) const LIST_GUARD: OwnershipGuard = OwnershipGuard::new(Resource::TodoList);

#[derive(Debug, Clone, Default)]
pub struct TodoListDraft {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TodoListPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
}

impl TodoListPatch {
    fn into_changes(self) -> Result<TodoListChanges, DomainError> {
        if self.title.is_none() && self.description.is_none() {
            return Err(DomainError::InvalidInput("nothing to update"));
        }

        Ok(TodoListChanges {
            title: self.title.as_deref().map(validation::title).transpose()?,
            description: self
                .description
                .map(|d| validation::description(d.as_deref()))
                .transpose()?,
        })
    }
}

#[derive(Clone)]
pub struct TodoListService {
    lists: Arc<dyn TodoListRepo>,
    todos: Arc<dyn TodoRepo>,
}

impl std::fmt::Debug for TodoListService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoListService").finish_non_exhaustive()
    }
}

impl TodoListService {
    pub fn new(lists: Arc<dyn TodoListRepo>, todos: Arc<dyn TodoRepo>) -> Self {
        Self { lists, todos }
    }

    pub async fn list(&self, caller_id: i64) -> ServiceResult<Vec<TodoListRow>> {
        Ok(self.lists.fetch_all_by_owner(caller_id).await?)
    }

    pub async fn create(&self, caller_id: i64, draft: TodoListDraft) -> ServiceResult<TodoListRow> {
        let new = NewTodoList {
            user_id: caller_id,
            title: validation::title(&draft.title)?,
            description: validation::description(draft.description.as_deref())?,
        };

        let list_id = self.lists.insert(new).await?;
        tracing::debug!(list_id, caller_id, "todo list created");

        self.get(caller_id, list_id).await
    }

    pub async fn get(&self, caller_id: i64, list_id: i64) -> ServiceResult<TodoListRow> {
        LIST_GUARD
            .fetch(caller_id, list_id, |id| self.lists.fetch(id))
            .await
    }

    pub async fn update(
        &self,
        caller_id: i64,
        list_id: i64,
        patch: TodoListPatch,
    ) -> ServiceResult<TodoListRow> {
        let changes = patch.into_changes()?;
        self.get(caller_id, list_id).await?;

        let affected = self.lists.update_fields(list_id, changes).await?;
        LIST_GUARD.affected(affected)?;

        self.get(caller_id, list_id).await
    }

    pub async fn delete(&self, caller_id: i64, list_id: i64) -> ServiceResult<()> {
        self.get(caller_id, list_id).await?;

        let affected = self.lists.delete(list_id).await?;
        LIST_GUARD.affected(affected)?;
        tracing::debug!(list_id, caller_id, "todo list deleted");
        Ok(())
    }

    /// Todos filed under one of the caller's lists.
    pub async fn todos(&self, caller_id: i64, list_id: i64) -> ServiceResult<Vec<TodoRow>> {
        self.get(caller_id, list_id).await?;

        let todos = self.todos.fetch_all_by_list(list_id).await?;
        Ok(todos
            .into_iter()
            .filter(|todo| todo.user_id == caller_id)
            .collect())
    }
}
