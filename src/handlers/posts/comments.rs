use axum::extract::{Extension, Path};
use axum::Json;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ReturnDocument;

use crate::api::dto::{CommentRequest, CommentResponse};
use crate::database::models::{Comment, Post};
use crate::database::DatabaseManager;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::validation::Validator;

use super::{find_post, load_author, post_not_found};

fn comment_responses(post: Post) -> Json<Vec<CommentResponse>> {
    Json(post.comments.into_iter().map(Into::into).collect())
}

/// POST /api/posts/comments/:id - Prepend a comment, newest first
pub async fn add(
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<CommentRequest>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    Validator::new()
        .require("text", body.text.as_deref(), "Text is required")
        .finish()?;

    let Some(text) = body.text else {
        return Err(ApiError::validation_msg("Text is required"));
    };

    let post_id = ObjectId::parse_str(&id).map_err(|_| post_not_found())?;
    let author = load_author(&auth_user).await?;
    let comment = mongodb::bson::to_bson(&Comment::new(&author, text))?;

    let updated = DatabaseManager::posts()
        .await?
        .find_one_and_update(
            doc! { "_id": post_id },
            doc! { "$push": { "comments": { "$each": [comment], "$position": 0 } } },
        )
        .return_document(ReturnDocument::After)
        .await?;

    match updated {
        Some(post) => Ok(comment_responses(post)),
        None => Err(post_not_found()),
    }
}

/// DELETE /api/posts/comments/:id/:comment_id - Comment authors only
pub async fn remove(
    Extension(auth_user): Extension<AuthUser>,
    Path((id, comment_id)): Path<(String, String)>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let post = find_post(&id).await?;

    let comment_oid = ObjectId::parse_str(&comment_id)
        .map_err(|_| ApiError::not_found("comment not found"))?;
    let comment = post
        .comments
        .iter()
        .find(|c| c.id == comment_oid)
        .ok_or_else(|| ApiError::not_found("comment not found"))?;

    if comment.user != auth_user.id {
        return Err(ApiError::unauthorized("User not authorized"));
    }

    let updated = DatabaseManager::posts()
        .await?
        .find_one_and_update(
            doc! { "_id": post.id },
            doc! { "$pull": { "comments": { "_id": comment_oid } } },
        )
        .return_document(ReturnDocument::After)
        .await?;

    // The post can disappear between the read and the pull.
    updated.map(comment_responses).ok_or_else(post_not_found)
}
