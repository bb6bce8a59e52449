/*
 * Responsibility
 * - todo の CRUD (呼び出し元 user id を常に明示的に受け取る)
 * - list_id を付ける時は、その list も caller のものか確認する
 */
use std::sync::Arc;

use crate::repos::todo_list_repo::TodoListRepo;
use crate::repos::todo_repo::{NewTodo, TodoChanges, TodoRepo, TodoRow};
use crate::services::error::{DomainError, Resource, ServiceResult};
use crate::services::ownership::OwnershipGuard;
use crate::services::todo_lists::LIST_GUARD;
use crate::services::validation;

const TODO_GUARD: OwnershipGuard = OwnershipGuard::new(Resource::Todo);

#[derive(Debug, Clone, Default)]
pub struct TodoDraft {
    pub title: String,
    pub description: Option<String>,
    pub list_id: Option<i64>,
    pub done: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub done: Option<bool>,
    // Some(None) detaches the todo from its list
    pub list_id: Option<Option<i64>>,
}

impl TodoPatch {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.done.is_none()
            && self.list_id.is_none()
    }
}

#[derive(Clone)]
pub struct TodoService {
    todos: Arc<dyn TodoRepo>,
    lists: Arc<dyn TodoListRepo>,
}

impl std::fmt::Debug for TodoService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoService").finish_non_exhaustive()
    }
}

impl TodoService {
    pub fn new(todos: Arc<dyn TodoRepo>, lists: Arc<dyn TodoListRepo>) -> Self {
        Self { todos, lists }
    }

    pub async fn list(&self, caller_id: i64) -> ServiceResult<Vec<TodoRow>> {
        Ok(self.todos.fetch_all_by_owner(caller_id).await?)
    }

    pub async fn create(&self, caller_id: i64, draft: TodoDraft) -> ServiceResult<TodoRow> {
        let title = validation::title(&draft.title)?;
        let description = validation::description(draft.description.as_deref())?;
        let list_id = match draft.list_id {
            Some(list_id) => Some(self.owned_list(caller_id, list_id).await?),
            None => None,
        };

        let todo_id = self
            .todos
            .insert(NewTodo {
                user_id: caller_id,
                list_id,
                title,
                description,
                done: draft.done,
            })
            .await?;
        tracing::debug!(todo_id, caller_id, "todo created");

        self.get(caller_id, todo_id).await
    }

    pub async fn get(&self, caller_id: i64, todo_id: i64) -> ServiceResult<TodoRow> {
        TODO_GUARD
            .fetch(caller_id, todo_id, |id| self.todos.fetch(id))
            .await
    }

    pub async fn update(
        &self,
        caller_id: i64,
        todo_id: i64,
        patch: TodoPatch,
    ) -> ServiceResult<TodoRow> {
        if patch.is_empty() {
            return Err(DomainError::InvalidInput("nothing to update").into());
        }

        let title = patch.title.as_deref().map(validation::title).transpose()?;
        let description = patch
            .description
            .map(|d| validation::description(d.as_deref()))
            .transpose()?;

        self.get(caller_id, todo_id).await?;

        let list_id = match patch.list_id {
            Some(Some(list_id)) => Some(Some(self.owned_list(caller_id, list_id).await?)),
            Some(None) => Some(None),
            None => None,
        };

        let changes = TodoChanges {
            title,
            description,
            done: patch.done,
            list_id,
        };
        let affected = self.todos.update_fields(todo_id, changes).await?;
        TODO_GUARD.affected(affected)?;

        self.get(caller_id, todo_id).await
    }

    pub async fn delete(&self, caller_id: i64, todo_id: i64) -> ServiceResult<()> {
        self.get(caller_id, todo_id).await?;

        let affected = self.todos.delete(todo_id).await?;
        TODO_GUARD.affected(affected)?;
        tracing::debug!(todo_id, caller_id, "todo deleted");
        Ok(())
    }

    async fn owned_list(&self, caller_id: i64, list_id: i64) -> ServiceResult<i64> {
        let list_id = validation::id(list_id)?;
        let list = LIST_GUARD
            .fetch(caller_id, list_id, |id| self.lists.fetch(id))
            .await?;
        Ok(list.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::memory::MemoryStore;
    use crate::repos::todo_list_repo::NewTodoList;
    use crate::services::error::ServiceError;

    const ALICE: i64 = 1;
    const BOB: i64 = 2;

    fn service(store: &MemoryStore) -> TodoService {
        TodoService::new(Arc::new(store.clone()), Arc::new(store.clone()))
    }

    fn draft(title: &str) -> TodoDraft {
        TodoDraft {
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn not_found_of<T>(result: &ServiceResult<T>) -> Option<Resource> {
        match result {
            Err(ServiceError::Domain(DomainError::NotFound(resource))) => Some(*resource),
            _ => None,
        }
    }

    async fn list_of(store: &MemoryStore, owner: i64) -> i64 {
        TodoListRepo::insert(
            store,
            NewTodoList {
                user_id: owner,
                title: "list".to_string(),
                description: None,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn happy_path_create_then_list() {
        let store = MemoryStore::new();
        let todos = service(&store);

        todos.create(ALICE, draft("buy milk")).await.unwrap();

        let mine = todos.list(ALICE).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "buy milk");
        assert_eq!(mine[0].user_id, ALICE);
        assert!(!mine[0].done);
        assert!(todos.list(BOB).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn cross_user_access_is_not_found() {
        let store = MemoryStore::new();
        let todos = service(&store);
        let todo = todos.create(ALICE, draft("buy milk")).await.unwrap();

        assert_eq!(
            not_found_of(&todos.get(BOB, todo.id).await),
            Some(Resource::Todo)
        );
        assert_eq!(
            not_found_of(
                &todos
                    .update(
                        BOB,
                        todo.id,
                        TodoPatch {
                            done: Some(true),
                            ..Default::default()
                        }
                    )
                    .await
            ),
            Some(Resource::Todo)
        );
        assert_eq!(
            not_found_of(&todos.delete(BOB, todo.id).await),
            Some(Resource::Todo)
        );

        let still_there = todos.get(ALICE, todo.id).await.unwrap();
        assert!(!still_there.done);
        assert_eq!(store.todo_count(), 1);
    }

    #[tokio::test]
    async fn foreign_and_missing_ids_give_identical_errors() {
        let store = MemoryStore::new();
        let todos = service(&store);
        let todo = todos.create(ALICE, draft("buy milk")).await.unwrap();

        let foreign = todos.get(BOB, todo.id).await.unwrap_err();
        let missing = todos.get(BOB, todo.id + 1000).await.unwrap_err();
        assert_eq!(foreign.to_string(), missing.to_string());
        assert_eq!(foreign.domain(), missing.domain());
    }

    #[tokio::test]
    async fn owner_can_update_and_delete() {
        let store = MemoryStore::new();
        let todos = service(&store);
        let todo = todos.create(ALICE, draft("buy milk")).await.unwrap();

        let updated = todos
            .update(
                ALICE,
                todo.id,
                TodoPatch {
                    title: Some("buy oat milk".to_string()),
                    done: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "buy oat milk");
        assert!(updated.done);
        assert_eq!(updated.user_id, ALICE);

        todos.delete(ALICE, todo.id).await.unwrap();
        assert_eq!(
            not_found_of(&todos.get(ALICE, todo.id).await),
            Some(Resource::Todo)
        );
    }

    #[tokio::test]
    async fn todo_cannot_join_someone_elses_list() {
        let store = MemoryStore::new();
        let todos = service(&store);
        let bobs_list = list_of(&store, BOB).await;
        let alices_list = list_of(&store, ALICE).await;

        let created = todos
            .create(
                ALICE,
                TodoDraft {
                    list_id: Some(bobs_list),
                    ..draft("sneaky")
                },
            )
            .await;
        assert_eq!(not_found_of(&created), Some(Resource::TodoList));
        assert_eq!(store.todo_count(), 0);

        let todo = todos
            .create(
                ALICE,
                TodoDraft {
                    list_id: Some(alices_list),
                    ..draft("fine")
                },
            )
            .await
            .unwrap();
        assert_eq!(todo.list_id, Some(alices_list));

        let moved = todos
            .update(
                ALICE,
                todo.id,
                TodoPatch {
                    list_id: Some(Some(bobs_list)),
                    ..Default::default()
                },
            )
            .await;
        assert_eq!(not_found_of(&moved), Some(Resource::TodoList));

        let detached = todos
            .update(
                ALICE,
                todo.id,
                TodoPatch {
                    list_id: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(detached.list_id, None);
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_storage() {
        let store = MemoryStore::new();
        let todos = service(&store);

        let result = todos.create(ALICE, draft("   ")).await;
        assert!(matches!(
            result,
            Err(ServiceError::Domain(DomainError::InvalidInput(_)))
        ));
        assert_eq!(store.todo_count(), 0);

        let todo = todos.create(ALICE, draft("ok")).await.unwrap();
        let result = todos.update(ALICE, todo.id, TodoPatch::default()).await;
        assert!(matches!(
            result,
            Err(ServiceError::Domain(DomainError::InvalidInput(_)))
        ));
    }
}
