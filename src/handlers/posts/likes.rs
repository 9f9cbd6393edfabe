use axum::extract::{Extension, Path};
use axum::Json;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ReturnDocument;

use crate::api::dto::LikeResponse;
use crate::database::models::{Like, Post};
use crate::database::DatabaseManager;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;

use super::post_not_found;

fn like_responses(post: Post) -> Json<Vec<LikeResponse>> {
    Json(post.likes.into_iter().map(Into::into).collect())
}

/// When the conditional update matched nothing, work out whether the post
/// is gone or the caller's like state already matched the request.
async fn reject_reason(post_id: ObjectId, already: &'static str) -> ApiError {
    let posts = match DatabaseManager::posts().await {
        Ok(posts) => posts,
        Err(err) => return err.into(),
    };
    match posts.find_one(doc! { "_id": post_id }).await {
        Ok(Some(_)) => ApiError::bad_request(already),
        Ok(None) => post_not_found(),
        Err(err) => err.into(),
    }
}

/// PUT /api/posts/like/:id - Add the caller's like unless one exists
pub async fn like(
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<LikeResponse>>> {
    let post_id = ObjectId::parse_str(&id).map_err(|_| post_not_found())?;
    let entry = mongodb::bson::to_bson(&Like { user: auth_user.id })?;

    // Filter carries the not-yet-liked condition so concurrent likes
    // cannot both match.
    let updated = DatabaseManager::posts()
        .await?
        .find_one_and_update(
            doc! { "_id": post_id, "likes.user": { "$ne": auth_user.id } },
            doc! { "$push": { "likes": { "$each": [entry], "$position": 0 } } },
        )
        .return_document(ReturnDocument::After)
        .await?;

    match updated {
        Some(post) => Ok(like_responses(post)),
        None => Err(reject_reason(post_id, "Post already liked").await),
    }
}

/// PUT /api/posts/unlike/:id - Remove the caller's like if present
pub async fn unlike(
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<LikeResponse>>> {
    let post_id = ObjectId::parse_str(&id).map_err(|_| post_not_found())?;

    let updated = DatabaseManager::posts()
        .await?
        .find_one_and_update(
            doc! { "_id": post_id, "likes.user": auth_user.id },
            doc! { "$pull": { "likes": { "user": auth_user.id } } },
        )
        .return_document(ReturnDocument::After)
        .await?;

    match updated {
        Some(post) => Ok(like_responses(post)),
        None => Err(reject_reason(post_id, "Post not liked").await),
    }
}
