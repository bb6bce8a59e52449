/*
 * Responsibility
 * - 環境変数の読み込み (DATABASE_URL, JWT_SECRET, TOKEN_TTL_SECONDS, CORS 許可など)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - 起動時に一度だけ読み、以降は各 service に注入する (global にしない)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub request_timeout_seconds: u64,
    pub body_limit_bytes: usize,

    pub jwt_secret: String,
    pub token_ttl_seconds: i64,
    pub bcrypt_cost: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the signing secret or credentials in DATABASE_URL
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish_non_exhaustive()
    }
}

fn parsed_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|_| ConfigError::Invalid(key))
        }
        _ => Ok(default),
    }
}

/// Upper bound for `TOKEN_TTL_SECONDS` (one year).
pub const MAX_TOKEN_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

fn checked_token_ttl(seconds: i64) -> Result<i64, ConfigError> {
    if (1..=MAX_TOKEN_TTL_SECONDS).contains(&seconds) {
        Ok(seconds)
    } else {
        Err(ConfigError::Invalid("TOKEN_TTL_SECONDS"))
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = parsed_or("PORT", 3000)?;
        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let database_max_connections = parsed_or("DATABASE_MAX_CONNECTIONS", 10)?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let request_timeout_seconds = parsed_or("REQUEST_TIMEOUT_SECONDS", 30)?;
        let body_limit_bytes = parsed_or("BODY_LIMIT_BYTES", 1024 * 1024)?;

        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET"));
        }

        let token_ttl_seconds = checked_token_ttl(parsed_or("TOKEN_TTL_SECONDS", 3600)?)?;

        // bcrypt accepts 4..=31
        let bcrypt_cost: u32 = parsed_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid("BCRYPT_COST"));
        }

        Ok(Self {
            addr,
            database_url,
            database_max_connections,
            app_env,
            cors_allowed_origins,
            request_timeout_seconds,
            body_limit_bytes,
            jwt_secret,
            token_ttl_seconds,
            bcrypt_cost,
        })
    }
}

#[cfg(test)]
impl Config {
    /// Development defaults that never touch the process environment.
    pub fn for_tests() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            database_url: "postgres://localhost/todo_api_test".to_string(),
            database_max_connections: 1,
            app_env: AppEnv::Development,
            cors_allowed_origins: Vec::new(),
            request_timeout_seconds: 30,
            body_limit_bytes: 1024 * 1024,
            jwt_secret: "test-secret".to_string(),
            token_ttl_seconds: 3600,
            bcrypt_cost: 4,
        }
    }
}
