pub mod comments;
pub mod likes;

use axum::{
    extract::{Extension, Path},
    Json,
};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};

use crate::api::dto::{MessageResponse, PostRequest, PostResponse};
use crate::database::models::{Post, User};
use crate::database::DatabaseManager;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::validation::Validator;

pub(super) fn post_not_found() -> ApiError {
    ApiError::not_found("post not found")
}

/// Look up the caller's account for name/avatar snapshots
pub(super) async fn load_author(auth_user: &AuthUser) -> Result<User, ApiError> {
    DatabaseManager::users()
        .await?
        .find_one(doc! { "_id": auth_user.id })
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))
}

/// Fetch a post by its path id; malformed and missing ids read the same
pub(super) async fn find_post(raw_id: &str) -> Result<Post, ApiError> {
    let id = ObjectId::parse_str(raw_id).map_err(|_| post_not_found())?;
    DatabaseManager::posts()
        .await?
        .find_one(doc! { "_id": id })
        .await?
        .ok_or_else(post_not_found)
}

/// POST /api/posts - Publish a post with the author's name/avatar snapshot
pub async fn create(
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<PostRequest>,
) -> ApiResult<Json<PostResponse>> {
    Validator::new()
        .require("text", body.text.as_deref(), "Text is required")
        .finish()?;

    let Some(text) = body.text else {
        return Err(ApiError::validation_msg("Text is required"));
    };

    let author = load_author(&auth_user).await?;
    let post = Post::new(&author, text);
    DatabaseManager::posts().await?.insert_one(&post).await?;

    Ok(Json(post.into()))
}

/// GET /api/posts - Every post, newest first
pub async fn list() -> ApiResult<Json<Vec<PostResponse>>> {
    let posts: Vec<Post> = DatabaseManager::posts()
        .await?
        .find(doc! {})
        .sort(doc! { "date": -1 })
        .await?
        .try_collect()
        .await?;

    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

/// GET /api/posts/:id - One post
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Json<PostResponse>> {
    let post = find_post(&id).await?;
    Ok(Json(post.into()))
}

/// DELETE /api/posts/:id - Authors remove their own posts only
pub async fn delete(
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let post = find_post(&id).await?;

    if post.user != auth_user.id {
        return Err(ApiError::unauthorized("user not authorized"));
    }

    DatabaseManager::posts()
        .await?
        .delete_one(doc! { "_id": post.id })
        .await?;

    Ok(Json(MessageResponse::new("post removed")))
}
