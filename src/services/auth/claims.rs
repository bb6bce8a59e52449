/*
 * Responsibility
 * - Identity (who is calling) <-> ClaimSet (identity + expiry) の変換
 * - ClaimSet <-> transport map (JWT payload) の変換
 * - decode 済み payload は untyped なので、ここで一度だけ型を確定させる
 */
use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

pub const CLAIM_USER_ID: &str = "user_id";
pub const CLAIM_NAME: &str = "name";
pub const CLAIM_EMAIL: &str = "email";
pub const CLAIM_EXP: &str = "exp";

/// The authenticated caller of the current request.
///
/// Built from a verified token for every request and dropped with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Serializable form of [`Identity`] plus expiry (unix seconds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimSet {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub expires_at: i64,
}

impl ClaimSet {
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.user_id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }

    pub fn into_identity(self) -> Identity {
        Identity {
            id: self.user_id,
            name: self.name,
            email: self.email,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidClaims {
    #[error("missing '{0}' claim")]
    Missing(&'static str),
    #[error("'{0}' claim has the wrong type")]
    WrongType(&'static str),
    #[error("'{0}' claim is not an integer")]
    NotInteger(&'static str),
    #[error("'{0}' claim is out of range")]
    OutOfRange(&'static str),
}

pub fn to_claim_set(identity: &Identity, ttl: Duration) -> Result<ClaimSet, InvalidClaims> {
    to_claim_set_at(identity, ttl, Utc::now())
}

/// `now + ttl` past chrono's representable range is `OutOfRange("exp")`.
pub fn to_claim_set_at(
    identity: &Identity,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<ClaimSet, InvalidClaims> {
    let expires_at = now
        .checked_add_signed(ttl)
        .ok_or(InvalidClaims::OutOfRange(CLAIM_EXP))?;

    Ok(ClaimSet {
        user_id: identity.id,
        name: identity.name.clone(),
        email: identity.email.clone(),
        expires_at: expires_at.timestamp(),
    })
}

pub fn to_transport_map(claims: &ClaimSet) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(CLAIM_USER_ID.to_string(), Value::from(claims.user_id));
    map.insert(CLAIM_NAME.to_string(), Value::from(claims.name.clone()));
    map.insert(CLAIM_EMAIL.to_string(), Value::from(claims.email.clone()));
    map.insert(CLAIM_EXP.to_string(), Value::from(claims.expires_at));
    map
}

/// Rebuild a typed [`ClaimSet`] from a decoded token payload.
///
/// Any shape mismatch rejects the whole claim set; nothing falls back to a
/// default, so a forged payload can never yield `user_id == 0`.
pub fn from_transport_map(map: &Map<String, Value>) -> Result<ClaimSet, InvalidClaims> {
    Ok(ClaimSet {
        user_id: integer_claim(map, CLAIM_USER_ID)?,
        name: string_claim(map, CLAIM_NAME)?,
        email: string_claim(map, CLAIM_EMAIL)?,
        expires_at: integer_claim(map, CLAIM_EXP)?,
    })
}

fn integer_claim(map: &Map<String, Value>, key: &'static str) -> Result<i64, InvalidClaims> {
    let value = map.get(key).ok_or(InvalidClaims::Missing(key))?;
    let Value::Number(number) = value else {
        return Err(InvalidClaims::WrongType(key));
    };

    if let Some(n) = number.as_i64() {
        return Ok(n);
    }

    // JSON numbers may come back as f64 (e.g. `1.0` or `1e3`).
    let f = number.as_f64().ok_or(InvalidClaims::NotInteger(key))?;
    if !f.is_finite() || f.fract() != 0.0 || f < i64::MIN as f64 || f >= i64::MAX as f64 {
        return Err(InvalidClaims::NotInteger(key));
    }
    Ok(f as i64)
}

fn string_claim(map: &Map<String, Value>, key: &'static str) -> Result<String, InvalidClaims> {
    match map.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(InvalidClaims::WrongType(key)),
        None => Err(InvalidClaims::Missing(key)),
    }
}
