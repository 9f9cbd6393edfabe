use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Token payload: `{"user": {"id": "..."}}` plus standard timestamps.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user: TokenUser,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenUser {
    pub id: String,
}

impl Claims {
    pub fn new(user_id: impl Into<String>, expiry_secs: i64) -> Self {
        let now = Utc::now();
        Self {
            user: TokenUser { id: user_id.into() },
            exp: (now + Duration::seconds(expiry_secs)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("JWT validation error: {0}")]
    TokenValidation(String),
    #[error("Invalid JWT secret")]
    InvalidSecret,
}

/// Sign a token for a user id. Secret and expiry are explicit so callers
/// (and tests) control them; handlers pass the configured values.
pub fn sign_token(user_id: &str, secret: &str, expiry_secs: i64) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let claims = Claims::new(user_id, expiry_secs);
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, &claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Verify signature and expiry, returning the embedded claims.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| JwtError::TokenValidation(e.to_string()))
}

/// Argon2id with a fresh random salt; output is a self-describing PHC string.
pub fn hash_password(plain: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(plain.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(plain: &str, phc_hash: &str) -> bool {
    PasswordHash::new(phc_hash)
        .and_then(|parsed| Argon2::default().verify_password(plain.as_bytes(), &parsed))
        .is_ok()
}
