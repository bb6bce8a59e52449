//! Stage 2: 検証済み claims の中身を確認する
//!
//! 署名が正しくても、user_id が正でない / name や email が空の token は通さない。

use axum::{body::Body, http::Request, middleware::Next, response::Response};

use crate::error::AppError;
use crate::services::auth::ClaimSet;

use super::verify::VerifiedClaims;

/// Claims that passed the shape checks and identify a caller.
#[derive(Debug, Clone)]
pub struct AuthenticatedClaims(pub ClaimSet);

pub(crate) fn check_shape(claims: &ClaimSet) -> Result<(), &'static str> {
    if claims.user_id <= 0 {
        return Err("non-positive user_id");
    }
    if claims.name.trim().is_empty() {
        return Err("empty name");
    }
    if claims.email.trim().is_empty() {
        return Err("empty email");
    }
    Ok(())
}

pub async fn authenticate(mut req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let Some(VerifiedClaims(claims)) = req.extensions_mut().remove::<VerifiedClaims>() else {
        tracing::error!(uri = %req.uri(), "authenticate ran before token verification");
        return Err(AppError::invalid_token());
    };

    if let Err(reason) = check_shape(&claims) {
        tracing::warn!(reason, user_id = claims.user_id, "token claims rejected");
        return Err(AppError::invalid_token());
    }

    req.extensions_mut().insert(AuthenticatedClaims(claims));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims() -> ClaimSet {
        ClaimSet {
            user_id: 9,
            name: "erin".to_string(),
            email: "erin@example.com".to_string(),
            expires_at: 4_102_444_800,
        }
    }

    #[test]
    fn well_formed_claims_pass() {
        assert_eq!(check_shape(&claims()), Ok(()));
    }

    #[test]
    fn malformed_claims_are_rejected() {
        let zero = ClaimSet {
            user_id: 0,
            ..claims()
        };
        let negative = ClaimSet {
            user_id: -3,
            ..claims()
        };
        let blank_name = ClaimSet {
            name: "  ".to_string(),
            ..claims()
        };
        let no_email = ClaimSet {
            email: String::new(),
            ..claims()
        };

        assert_eq!(check_shape(&zero), Err("non-positive user_id"));
        assert_eq!(check_shape(&negative), Err("non-positive user_id"));
        assert_eq!(check_shape(&blank_name), Err("empty name"));
        assert_eq!(check_shape(&no_email), Err("empty email"));
    }
}
