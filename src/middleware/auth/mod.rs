//! 保護された route に掛ける認証チェーン
//!
//! verify (署名/期限) → authenticate (claims の形) → inject (RequestContext)
//! の順で走る。各段は前段が extensions に置いた型を取り出して次の型を置くので、
//! 順番を入れ替えると 401 で閉じる。

pub mod authenticate;
pub mod inject;
pub mod verify;

use axum::{Router, middleware};
use tower::ServiceBuilder;

use crate::state::AppState;

pub use authenticate::AuthenticatedClaims;
pub use verify::VerifiedClaims;

/// Require a valid bearer token on every route of `router`.
///
/// ```ignore
/// let protected = middleware::auth::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // route_layer: 存在しない path は認証より先に 404 になる
    router.route_layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn_with_state(state, verify::verify_token))
            .layer(middleware::from_fn(authenticate::authenticate))
            .layer(middleware::from_fn(inject::inject_identity)),
    )
}
