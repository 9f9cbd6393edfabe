use axum::{extract::Extension, Json};
use mongodb::bson::doc;

use crate::api::dto::{LoginRequest, TokenResponse, UserResponse};
use crate::auth;
use crate::config;
use crate::database::DatabaseManager;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::validation::Validator;

/// GET /api/auth - The authenticated account, password omitted
pub async fn current_user(Extension(auth_user): Extension<AuthUser>) -> ApiResult<Json<UserResponse>> {
    let users = DatabaseManager::users().await?;
    let user = users
        .find_one(doc! { "_id": auth_user.id })
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    Ok(Json(user.into()))
}

/// POST /api/auth - Exchange credentials for a session token
pub async fn login(Json(body): Json<LoginRequest>) -> ApiResult<Json<TokenResponse>> {
    Validator::new()
        .email("email", body.email.as_deref(), "Please include a valid email")
        .require("password", body.password.as_deref(), "Password is required")
        .finish()?;

    let (Some(email), Some(password)) = (body.email, body.password) else {
        return Err(ApiError::validation_msg("invalid request"));
    };
    let email = email.trim().to_lowercase();

    let users = DatabaseManager::users().await?;
    let user = users
        .find_one(doc! { "email": &email })
        .await?
        .ok_or_else(invalid_credentials)?;

    if !auth::verify_password(&password, &user.password) {
        return Err(invalid_credentials());
    }

    let security = &config::config().security;
    let token = auth::sign_token(&user.id.to_hex(), &security.jwt_secret, security.jwt_expiry_secs)?;

    Ok(Json(TokenResponse { token }))
}

// Same body for unknown email and wrong password; no account probing
fn invalid_credentials() -> ApiError {
    ApiError::validation_msg("Invalid credentials")
}
