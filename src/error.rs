/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / `{ "error": "<message>" }`)
 * - ServiceError を統一的に変換 (内部エラーの詳細はログにだけ出す)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::{DomainError, Resource, ServiceError};

pub const INTERNAL_MESSAGE: &str = "internal server error";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("{0} not found")]
    NotFound(Resource),
    #[error("{0} is already taken")]
    Conflict(&'static str),
    /// Extractor rejection whose status is passed through as-is (415, 413, ...).
    #[error("{message}")]
    Rejected {
        status: StatusCode,
        message: &'static str,
    },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Rejected { status, .. } => *status,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Token problems all look the same to the client.
    pub fn invalid_token() -> Self {
        AppError::Unauthorized("missing or invalid token")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidInput(message) => AppError::BadRequest(message),
            DomainError::Unauthorized(message) => AppError::Unauthorized(message),
            DomainError::Forbidden(message) => AppError::Forbidden(message),
            DomainError::NotFound(resource) => AppError::NotFound(resource),
            DomainError::Duplicate(field) => AppError::Conflict(field),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Domain(e) => e.into(),
            ServiceError::Internal { context, source } => {
                tracing::error!(context, error = ?source, "request failed");
                AppError::Internal
            }
        }
    }
}
