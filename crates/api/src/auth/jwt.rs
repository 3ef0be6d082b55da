//! Session tokens.
//!
//! A session is an HS256-signed JWT whose [`Claims`] identify the user. Its
//! `jti` names the stored session row, which logout revokes. The token
//! travels in the session cookie or an `Authorization: Bearer` header.

use cadastro_core::types::DbId;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEFAULT_SESSION_EXPIRY_MINS: i64 = 480;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: DbId,
    pub login: String,
    /// Role name, see `cadastro_core::roles`.
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    /// Claims for a session opened at `issued_at` (Unix seconds).
    fn new(user_id: DbId, login: &str, role: &str, issued_at: i64, lifetime_secs: i64) -> Self {
        Self {
            sub: user_id,
            login: login.to_string(),
            role: role.to_string(),
            exp: issued_at + lifetime_secs,
            iat: issued_at,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Signing secret and session lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub session_expiry_mins: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required, non-empty) and `SESSION_EXPIRY_MINS`
    /// (default 480).
    ///
    /// # Panics
    ///
    /// Panics when the secret is missing or empty, or the lifetime is not an
    /// integer.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        assert!(!secret.trim().is_empty(), "JWT_SECRET must not be empty");

        let session_expiry_mins = match std::env::var("SESSION_EXPIRY_MINS") {
            Ok(raw) => raw
                .parse()
                .expect("SESSION_EXPIRY_MINS must be an integer"),
            Err(_) => DEFAULT_SESSION_EXPIRY_MINS,
        };

        Self {
            secret,
            session_expiry_mins,
        }
    }

    pub fn session_expiry_secs(&self) -> i64 {
        self.session_expiry_mins * 60
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.secret.as_bytes())
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.secret.as_bytes())
    }
}

/// A signed session token and the claims inside it.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub claims: Claims,
}

/// Sign a new session token for `user_id`.
pub fn issue_session_token(
    user_id: DbId,
    login: &str,
    role: &str,
    config: &JwtConfig,
) -> Result<SessionToken, jsonwebtoken::errors::Error> {
    let claims = Claims::new(
        user_id,
        login,
        role,
        Utc::now().timestamp(),
        config.session_expiry_secs(),
    );
    let token = encode(&Header::new(Algorithm::HS256), &claims, &config.encoding_key())?;
    Ok(SessionToken { token, claims })
}

/// Decode a session token, checking its signature, algorithm and expiry.
///
/// Only `exp` is required: `sub` is numeric and jsonwebtoken's presence check
/// for it only accepts strings.
pub fn verify_session_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp"]);
    decode::<Claims>(token, &config.decoding_key(), &validation).map(|data| data.claims)
}
