use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::Identity;

use super::RequestContext;

/// Handler で、認証済み Identity を受け取るための extractor
/// middleware が RequestContext を request.extensions() に insert 済みである前提
/// 見つからない場合は 403 (配線ミス扱い。匿名ユーザーとしては通さない)
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .and_then(RequestContext::extract)
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                tracing::error!(uri = %parts.uri, "protected handler reached without an identity");
                AppError::Forbidden("no authenticated user")
            })
    }
}
