//! Factory: build the process-wide auth services from application `Config`.
use std::sync::Arc;

use chrono::Duration;

use crate::config::{Config, ConfigError};
use crate::services::auth::{BcryptHasher, PasswordHasher, TokenService};

pub fn build_token_service(config: &Config) -> Result<Arc<TokenService>, ConfigError> {
    let ttl = Duration::try_seconds(config.token_ttl_seconds)
        .ok_or(ConfigError::Invalid("TOKEN_TTL_SECONDS"))?;
    let tokens = TokenService::new(&config.jwt_secret, ttl).map_err(|e| {
        tracing::error!(error = %e, "failed to build token service");
        ConfigError::Invalid("JWT_SECRET")
    })?;

    Ok(Arc::new(tokens))
}

pub fn build_password_hasher(config: &Config) -> Arc<dyn PasswordHasher> {
    Arc::new(BcryptHasher::new(config.bcrypt_cost))
}
