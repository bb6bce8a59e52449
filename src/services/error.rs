/*
 * Responsibility
 * - service 境界を越えるエラーの定義
 * - DomainError: クライアントに意味のある閉じた種類 (メッセージは固定文字列のみ)
 * - ServiceError::Internal: それ以外すべて (原因はログにだけ残す)
 */
use std::fmt;

use thiserror::Error;

use crate::repos::RepoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    TodoList,
    Todo,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::User => "user",
            Resource::TodoList => "todo list",
            Resource::Todo => "todo",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(Resource),
    #[error("{0}")]
    InvalidInput(&'static str),
    #[error("{0} is already taken")]
    Duplicate(&'static str),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    Forbidden(&'static str),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("{context}")]
    Internal {
        context: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ServiceError {
    pub fn internal(context: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            context,
            source: source.into(),
        }
    }

    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Internal { .. } => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(e: RepoError) -> Self {
        Self::internal("storage failure", e)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
