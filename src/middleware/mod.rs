/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: 保護 route 用の認証チェーン (Router<AppState> に掛ける)
 * - http / cors / security_headers: 全 route に掛ける横断的な layer
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
