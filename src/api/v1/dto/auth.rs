use serde::{Deserialize, Serialize};

use crate::api::v1::dto::users::UserResponse;
use crate::services::users::{Session, SignupInput};

pub const TOKEN_TYPE: &str = "Bearer";

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl From<SignupRequest> for SignupInput {
    fn from(req: SignupRequest) -> Self {
        SignupInput {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub token_type: &'static str,
    /// Seconds until the token expires.
    pub expires_in: i64,
    pub user: UserResponse,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        SessionResponse {
            token: session.token.token,
            token_type: TOKEN_TYPE,
            expires_in: session.token.expires_in,
            user: session.user.into(),
        }
    }
}
