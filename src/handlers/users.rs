use axum::Json;
use mongodb::bson::doc;
use sha2::{Digest, Sha256};

use crate::api::dto::{RegisterRequest, TokenResponse};
use crate::auth;
use crate::config;
use crate::database::models::User;
use crate::database::DatabaseManager;
use crate::error::{ApiError, ApiResult};
use crate::validation::Validator;

/// POST /api/users - Register an account and hand back a session token
pub async fn register(Json(body): Json<RegisterRequest>) -> ApiResult<Json<TokenResponse>> {
    Validator::new()
        .require("name", body.name.as_deref(), "Name is required")
        .email("email", body.email.as_deref(), "Please include a valid email")
        .min_length(
            "password",
            body.password.as_deref(),
            6,
            "Please enter a password with 6 or more characters",
        )
        .finish()?;

    let (Some(name), Some(email), Some(password)) = (body.name, body.email, body.password) else {
        return Err(ApiError::validation_msg("invalid request"));
    };
    let email = email.trim().to_lowercase();

    let users = DatabaseManager::users().await?;
    if users.find_one(doc! { "email": &email }).await?.is_some() {
        return Err(ApiError::validation_msg("user already exists"));
    }

    let avatar = gravatar_url(&email);
    let password_hash = auth::hash_password(&password)?;
    let user = User::new(name.trim().to_string(), email, password_hash, avatar);

    if let Err(err) = users.insert_one(&user).await {
        // The unique email index closes the lookup-then-insert race
        if DatabaseManager::is_duplicate_key(&err) {
            return Err(ApiError::validation_msg("user already exists"));
        }
        return Err(err.into());
    }

    let security = &config::config().security;
    let token = auth::sign_token(&user.id.to_hex(), &security.jwt_secret, security.jwt_expiry_secs)?;

    Ok(Json(TokenResponse { token }))
}

/// Deterministic avatar URL derived from the normalized email
pub fn gravatar_url(email: &str) -> String {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    format!("https://www.gravatar.com/avatar/{:x}?s=200&r=pg&d=mm", digest)
}
