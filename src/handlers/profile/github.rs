use axum::{extract::Path, Json};

use crate::api::dto::RepoResponse;
use crate::error::{ApiError, ApiResult};
use crate::services::GithubService;

/// GET /api/profile/github/:username - Recent public repos for a username.
/// Upstream failures of any kind surface as the same 404.
pub async fn repos(Path(username): Path<String>) -> ApiResult<Json<Vec<RepoResponse>>> {
    let github = GithubService::from_config();

    match github.recent_repos(&username).await {
        Ok(repos) => Ok(Json(repos)),
        Err(err) => {
            tracing::warn!("github lookup for {} failed: {}", username, err);
            Err(ApiError::not_found("no profile found"))
        }
    }
}
