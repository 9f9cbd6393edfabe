// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::{json, Value};

/// One entry in a 400 validation response, mirroring the
/// `{"errors": [{"msg", "param"}]}` contract.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<&'static str>,
}

impl FieldError {
    pub fn new(msg: impl Into<String>, param: &'static str) -> Self {
        Self { msg: msg.into(), param: Some(param) }
    }

    pub fn bare(msg: impl Into<String>) -> Self {
        Self { msg: msg.into(), param: None }
    }
}

/// HTTP API error with appropriate status codes and client-friendly bodies
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request with an errors array
    Validation(Vec<FieldError>),

    // 400 Bad Request with a single message
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error; detail is logged, never sent to clients
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::Internal(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(errors) => {
                errors.first().map(|e| e.msg.as_str()).unwrap_or("invalid request")
            }
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Internal(_) => "server error",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::Validation(errors) => json!({ "errors": errors }),
            ApiError::Internal(_) => json!({ "msg": "server error" }),
            _ => json!({ "msg": self.message() }),
        }
    }
}

// Static constructor methods used throughout the handlers
impl ApiError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        ApiError::Validation(errors)
    }

    /// Single-cause validation failure, still wrapped in the errors array
    pub fn validation_msg(msg: impl Into<String>) -> Self {
        ApiError::Validation(vec![FieldError::bare(msg)])
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ApiError::Unauthorized(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        ApiError::Internal(detail.into())
    }
}

// Convert other error types to ApiError; unexpected failures are logged here
// and surface as the generic 500 body.
impl From<crate::database::manager::DatabaseError> for ApiError {
    fn from(err: crate::database::manager::DatabaseError) -> Self {
        tracing::error!("database error: {}", err);
        ApiError::Internal(err.to_string())
    }
}

impl From<mongodb::error::Error> for ApiError {
    fn from(err: mongodb::error::Error) -> Self {
        tracing::error!("mongodb error: {}", err);
        ApiError::Internal(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for ApiError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        tracing::error!("bson encoding error: {}", err);
        ApiError::Internal(err.to_string())
    }
}

impl From<crate::auth::JwtError> for ApiError {
    fn from(err: crate::auth::JwtError) -> Self {
        tracing::error!("jwt error: {}", err);
        ApiError::Internal(err.to_string())
    }
}

impl From<argon2::password_hash::Error> for ApiError {
    fn from(err: argon2::password_hash::Error) -> Self {
        tracing::error!("password hashing error: {}", err);
        ApiError::Internal(err.to_string())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Internal(detail) => write!(f, "{}", detail),
            _ => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

/// Handler result alias; errors serialize themselves via `IntoResponse`
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_body_is_an_errors_array() {
        let err = ApiError::validation(vec![
            FieldError::new("Name is required", "name"),
            FieldError::bare("user already exists"),
        ]);
        assert_eq!(err.status_code(), 400);

        let body = err.to_json();
        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0]["msg"], "Name is required");
        assert_eq!(errors[0]["param"], "name");
        assert!(errors[1].get("param").is_none());
    }

    #[test]
    fn single_cause_bodies_use_msg() {
        let err = ApiError::not_found("post not found");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.to_json(), serde_json::json!({ "msg": "post not found" }));
    }

    #[test]
    fn internal_detail_never_leaks() {
        let err = ApiError::internal("connection refused at 10.0.0.5:27017");
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_json(), serde_json::json!({ "msg": "server error" }));
    }
}
