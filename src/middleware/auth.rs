use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use mongodb::bson::oid::ObjectId;

use crate::auth;
use crate::config;
use crate::error::ApiError;

/// Authenticated caller extracted from the bearer token
#[derive(Clone, Copy, Debug)]
pub struct AuthUser {
    pub id: ObjectId,
}

/// Bearer-token middleware: verifies the JWT and injects [`AuthUser`] into
/// request extensions for protected handlers.
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| ApiError::unauthorized("no token"))?;

    let secret = &config::config().security.jwt_secret;
    let claims = auth::verify_token(&token, secret)
        .map_err(|_| ApiError::unauthorized("token is not valid"))?;

    // A signed token can still carry an id we cannot address
    let id = ObjectId::parse_str(&claims.user.id)
        .map_err(|_| ApiError::unauthorized("token is not valid"))?;

    request.extensions_mut().insert(AuthUser { id });

    Ok(next.run(request).await)
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_str = headers.get("authorization")?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
