//! `Json<T>` whose rejection uses the API error envelope.
//!
//! Bad syntax and wrong shapes are 400. Other rejections keep their own
//! status (415 without a JSON content type, 413 over the body limit).
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

fn rejection_error(rejection: &JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
            AppError::BadRequest("invalid JSON body")
        }
        JsonRejection::MissingJsonContentType(_) => AppError::Rejected {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            message: "content type must be application/json",
        },
        other => {
            let status = other.status();
            let message = match status {
                StatusCode::PAYLOAD_TOO_LARGE => "request body too large",
                _ => status.canonical_reason().unwrap_or("invalid request body"),
            };
            AppError::Rejected { status, message }
        }
    }
}

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                tracing::debug!(
                    status = %rejection.status(),
                    error = %rejection.body_text(),
                    "rejected request body"
                );
                Err(rejection_error(&rejection))
            }
        }
    }
}
