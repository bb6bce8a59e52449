/*
 * Responsibility
 * - fetch-then-check: id だけで取得 → 所有者比較 → 不一致/不存在はどちらも NotFound
 * - 他ユーザーのリソースの「存在」を観測させない (Forbidden は返さない)
 * - リソース種別ごとに OwnershipGuard を 1 つ持ち、チェックの重複実装を避ける
 */
use std::future::Future;

use crate::repos::RepoResult;
use crate::repos::todo_list_repo::TodoListRow;
use crate::repos::todo_repo::TodoRow;
use crate::repos::user_repo::UserRow;
use crate::services::error::{DomainError, Resource, ServiceResult};

/// A row with a single owning user.
pub trait Owned {
    fn owner_id(&self) -> i64;
}

impl Owned for TodoRow {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

impl Owned for TodoListRow {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

// A user owns exactly their own row.
impl Owned for UserRow {
    fn owner_id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OwnershipGuard {
    resource: Resource,
}

impl OwnershipGuard {
    pub const fn new(resource: Resource) -> Self {
        Self { resource }
    }

    pub fn not_found(&self) -> DomainError {
        DomainError::NotFound(self.resource)
    }

    /// Fetch `resource_id` without a caller filter, then require `caller_id` to own it.
    pub async fn fetch<T, F, Fut>(
        &self,
        caller_id: i64,
        resource_id: i64,
        fetch: F,
    ) -> ServiceResult<T>
    where
        T: Owned,
        F: FnOnce(i64) -> Fut,
        Fut: Future<Output = RepoResult<Option<T>>>,
    {
        let found = fetch(resource_id).await?;
        self.check(found, caller_id, resource_id)
    }

    pub fn check<T: Owned>(
        &self,
        found: Option<T>,
        caller_id: i64,
        resource_id: i64,
    ) -> ServiceResult<T> {
        match found {
            Some(row) if row.owner_id() == caller_id => Ok(row),
            Some(row) => {
                tracing::debug!(
                    resource = %self.resource,
                    resource_id,
                    caller_id,
                    owner_id = row.owner_id(),
                    "ownership mismatch reported as not found"
                );
                Err(self.not_found().into())
            }
            None => Err(self.not_found().into()),
        }
    }

    /// `affected == 0` after a checked update/delete means the row vanished in between.
    pub fn affected(&self, affected: u64) -> ServiceResult<()> {
        if affected == 0 {
            return Err(self.not_found().into());
        }
        Ok(())
    }
}
