use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, TokenData, Validation};

use crate::entities::token::Claims;
use crate::errors::AuthError;
use crate::settings::{AppConfig, JwtKeys};

const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

/// Verifies bearer tokens minted by the identity provider with the shared
/// secret. Stateless: no sessions, no refresh handling; clients re-request
/// a fresh token per call.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    expiration: Duration,
}

impl JwtService {
    pub fn new(config: &AppConfig) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            expiration: Duration::minutes(config.jwt_expiration_minutes),
        }
    }

    /// Mints a token the way the identity provider would. Used by the admin
    /// designation tooling and the test suite; the service itself only
    /// verifies.
    pub fn create_token(&self, sub: &str, email: &str, admin: bool) -> Result<String, AuthError> {
        let now = Utc::now();

        let claims = Claims {
            sub: sub.to_string(),
            email: email.to_string(),
            admin,
            exp: (now + self.expiration).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.encoding)
            .map_err(|_| AuthError::TokenCreation)
    }

    pub fn decode_token(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.keys.decoding, &validation).map_err(AuthError::from)
    }
}
