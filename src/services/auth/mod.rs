pub mod claims;
pub mod factory;
pub mod password;
pub mod token;

pub use claims::{ClaimSet, Identity, InvalidClaims};
pub use factory::{build_password_hasher, build_token_service};
pub use password::{BcryptHasher, PasswordHasher};
pub use token::{IssuedToken, TokenError, TokenService};
