/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - request ごとに新しく作られ、request と一緒に捨てられる (共有・キャッシュしない)
 * - attach は元の context を変更せず、新しい context を返す (write-once)
 */
use std::sync::Arc;

use thiserror::Error;

use crate::services::auth::Identity;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("an identity is already attached to this request")]
pub struct AlreadyAttached;

/// Request-scoped carrier for the authenticated caller.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    identity: Option<Arc<Identity>>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a context carrying `identity`. `self` is left as it was.
    pub fn attach(&self, identity: Identity) -> Result<Self, AlreadyAttached> {
        if self.identity.is_some() {
            return Err(AlreadyAttached);
        }

        Ok(Self {
            identity: Some(Arc::new(identity)),
        })
    }

    /// `None` means no authenticated caller. On a protected route that is a
    /// wiring bug, never an anonymous user.
    pub fn extract(&self) -> Option<&Identity> {
        self.identity.as_deref()
    }
}

pub fn attach(ctx: &RequestContext, identity: Identity) -> Result<RequestContext, AlreadyAttached> {
    ctx.attach(identity)
}

pub fn extract(ctx: &RequestContext) -> Option<&Identity> {
    ctx.extract()
}
