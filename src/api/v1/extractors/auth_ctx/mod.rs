/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - 認証済みリクエストのコンテキスト（RequestContext）を handler に提供する
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - RequestContext, attach, extract
 * - CurrentUser
 */

mod core;
mod types;

pub use core::CurrentUser;
pub use types::{AlreadyAttached, RequestContext, attach, extract};
