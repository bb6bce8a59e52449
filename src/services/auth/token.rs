use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::services::auth::claims::{
    self, ClaimSet, Identity, InvalidClaims, to_claim_set, to_transport_map,
};

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("signing secret must not be empty")]
    EmptySecret,
    #[error("malformed token: {0}")]
    Malformed(jsonwebtoken::errors::Error),
    #[error("token signature mismatch")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error(transparent)]
    InvalidClaims(#[from] InvalidClaims),
    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

impl TokenError {
    /// Short, stable label for log fields.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::EmptySecret => "empty_secret",
            Self::Malformed(_) => "malformed",
            Self::InvalidSignature => "invalid_signature",
            Self::Expired => "expired",
            Self::InvalidClaims(_) => "invalid_claims",
            Self::Signing(_) => "signing_failed",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Malformed(e),
        }
    }
}

/// A freshly signed bearer token and what went into it.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
    pub claims: ClaimSet,
}

/// HS256 signer/verifier for bearer tokens.
///
/// - Single shared secret, injected once at startup.
/// - Stateless: nothing is stored server-side, nothing is revoked.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenService")
            .field("ttl_seconds", &self.ttl.num_seconds())
            .finish()
    }
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `verify_at` against the (injectable) clock, after
        // the claims have been re-typed.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&[claims::CLAIM_EXP]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, claims: &ClaimSet) -> Result<String, TokenError> {
        self.sign_map(&to_transport_map(claims))
    }

    /// Build a claim set for `identity` with the configured TTL and sign it.
    pub fn issue_for(&self, identity: &Identity) -> Result<IssuedToken, TokenError> {
        let claims = to_claim_set(identity, self.ttl)?;
        let token = self.issue(&claims)?;

        Ok(IssuedToken {
            token,
            expires_in: self.ttl.num_seconds(),
            claims,
        })
    }

    pub fn verify(&self, token: &str) -> Result<ClaimSet, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Parse, check the signature, re-type the claims and check expiry.
    ///
    /// Any failure discards the whole token.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<ClaimSet, TokenError> {
        let data =
            jsonwebtoken::decode::<Map<String, Value>>(token, &self.decoding_key, &self.validation)?;

        let claims = claims::from_transport_map(&data.claims)?;

        if claims.expires_at <= now.timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn sign_map(&self, payload: &Map<String, Value>) -> Result<String, TokenError> {
        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, payload, &self.encoding_key).map_err(TokenError::Signing)
    }
}
