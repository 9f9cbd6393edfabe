use axum::{
    extract::{Extension, Path},
    Json,
};
use mongodb::bson::{doc, oid::ObjectId, to_bson};
use mongodb::options::ReturnDocument;

use crate::api::dto::{parse_entry_date, ExperienceRequest, ProfileResponse};
use crate::database::models::ExperienceEntry;
use crate::database::DatabaseManager;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::validation::Validator;

/// PUT /api/profile/experience - Prepend a work entry to the caller's profile
pub async fn add(
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<ExperienceRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let from = body.from.as_deref().and_then(parse_entry_date);
    let to = body.to.as_deref().and_then(parse_entry_date);
    let from_given = body.from.as_deref().map_or(false, |v| !v.trim().is_empty());
    let to_given = body.to.as_deref().map_or(false, |v| !v.trim().is_empty());

    Validator::new()
        .require("title", body.title.as_deref(), "Title is required")
        .require("company", body.company.as_deref(), "Company is required")
        .require("from", body.from.as_deref(), "From date is required")
        .check("from", !from_given || from.is_some(), "From date is invalid")
        .check("to", !to_given || to.is_some(), "To date is invalid")
        .finish()?;

    let (Some(title), Some(company), Some(from)) = (body.title, body.company, from) else {
        return Err(ApiError::validation_msg("invalid request"));
    };

    let entry = ExperienceEntry {
        id: ObjectId::new(),
        title: title.trim().to_string(),
        company: company.trim().to_string(),
        location: body.location,
        from,
        to,
        current: body.current,
        description: body.description,
    };

    let profiles = DatabaseManager::profiles().await?;
    let profile = profiles
        .find_one_and_update(
            doc! { "user": auth_user.id },
            doc! { "$push": { "experience": { "$each": [to_bson(&entry)?], "$position": 0 } } },
        )
        .return_document(ReturnDocument::After)
        .await?
        .ok_or_else(|| ApiError::bad_request("there is no profile for this user"))?;

    Ok(Json(ProfileResponse::from_profile(profile)))
}

/// DELETE /api/profile/experience/:id - Remove one entry by its id
pub async fn remove(
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProfileResponse>> {
    let entry_id =
        ObjectId::parse_str(&id).map_err(|_| ApiError::not_found("experience not found"))?;

    let profiles = DatabaseManager::profiles().await?;
    let result = profiles
        .update_one(
            doc! { "user": auth_user.id },
            doc! { "$pull": { "experience": { "_id": entry_id } } },
        )
        .await?;

    if result.matched_count == 0 {
        return Err(ApiError::bad_request("there is no profile for this user"));
    }
    if result.modified_count == 0 {
        return Err(ApiError::not_found("experience not found"));
    }

    let profile = profiles
        .find_one(doc! { "user": auth_user.id })
        .await?
        .ok_or_else(|| ApiError::bad_request("there is no profile for this user"))?;

    Ok(Json(ProfileResponse::from_profile(profile)))
}
