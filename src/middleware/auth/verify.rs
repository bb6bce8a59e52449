//! Stage 1: `Authorization: Bearer <jwt>` の署名と有効期限を検証する
//!
//! - 成功したら VerifiedClaims を extensions に入れて次へ
//! - 失敗理由 (header 無し / 改ざん / 期限切れ / claim 不正) はログだけで区別し、
//!   client には同じ 401 を返す

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::ClaimSet;
use crate::state::AppState;

/// Claims whose signature and expiry have been checked. Shape is not trusted yet.
#[derive(Debug, Clone)]
pub struct VerifiedClaims(pub ClaimSet);

pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

pub async fn verify_token(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = bearer_token(req.headers()) else {
        tracing::debug!(uri = %req.uri(), "request without bearer token");
        return Err(AppError::invalid_token());
    };

    let claims = match state.tokens.verify(token) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(
                reason = err.reason(),
                error = %err,
                "access token verification failed"
            );
            return Err(AppError::invalid_token());
        }
    };

    req.extensions_mut().insert(VerifiedClaims(claims));

    Ok(next.run(req).await)
}
