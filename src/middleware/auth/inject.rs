//! Stage 3: claims を Identity に変換して RequestContext に載せる
//!
//! handler はここで入れた RequestContext を CurrentUser extractor 経由でしか見ない。

use axum::{body::Body, http::Request, middleware::Next, response::Response};

use crate::api::v1::extractors::RequestContext;
use crate::error::AppError;

use super::authenticate::AuthenticatedClaims;

pub async fn inject_identity(mut req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let Some(AuthenticatedClaims(claims)) = req.extensions_mut().remove::<AuthenticatedClaims>()
    else {
        tracing::error!(uri = %req.uri(), "identity injection ran before authentication");
        return Err(AppError::invalid_token());
    };

    let base = req
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_default();

    let ctx = base.attach(claims.into_identity()).map_err(|err| {
        tracing::error!(error = %err, "request context already carries an identity");
        AppError::Internal
    })?;

    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}
