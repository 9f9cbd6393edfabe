use axum::{
    extract::{Extension, Path},
    Json,
};
use mongodb::bson::{doc, oid::ObjectId, to_bson};
use mongodb::options::ReturnDocument;

use crate::api::dto::{parse_entry_date, EducationRequest, ProfileResponse};
use crate::database::models::EducationEntry;
use crate::database::DatabaseManager;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::validation::Validator;

/// PUT /api/profile/education - Prepend a study entry to the caller's profile
pub async fn add(
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<EducationRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let from = body.from.as_deref().and_then(parse_entry_date);
    let to = body.to.as_deref().and_then(parse_entry_date);
    let from_given = body.from.as_deref().map_or(false, |v| !v.trim().is_empty());
    let to_given = body.to.as_deref().map_or(false, |v| !v.trim().is_empty());

    Validator::new()
        .require("school", body.school.as_deref(), "School is required")
        .require("degree", body.degree.as_deref(), "Degree is required")
        .require(
            "fieldofstudy",
            body.fieldofstudy.as_deref(),
            "Field of study is required",
        )
        .require("from", body.from.as_deref(), "From date is required")
        .check("from", !from_given || from.is_some(), "From date is invalid")
        .check("to", !to_given || to.is_some(), "To date is invalid")
        .finish()?;

    let (Some(school), Some(degree), Some(fieldofstudy), Some(from)) =
        (body.school, body.degree, body.fieldofstudy, from)
    else {
        return Err(ApiError::validation_msg("invalid request"));
    };

    let entry = EducationEntry {
        id: ObjectId::new(),
        school: school.trim().to_string(),
        degree: degree.trim().to_string(),
        fieldofstudy: fieldofstudy.trim().to_string(),
        from,
        to,
        current: body.current,
        description: body.description,
    };

    let profiles = DatabaseManager::profiles().await?;
    let profile = profiles
        .find_one_and_update(
            doc! { "user": auth_user.id },
            doc! { "$push": { "education": { "$each": [to_bson(&entry)?], "$position": 0 } } },
        )
        .return_document(ReturnDocument::After)
        .await?
        .ok_or_else(|| ApiError::bad_request("there is no profile for this user"))?;

    Ok(Json(ProfileResponse::from_profile(profile)))
}

/// DELETE /api/profile/education/:id - Remove one entry by its id
pub async fn remove(
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProfileResponse>> {
    let entry_id =
        ObjectId::parse_str(&id).map_err(|_| ApiError::not_found("education not found"))?;

    let profiles = DatabaseManager::profiles().await?;
    let result = profiles
        .update_one(
            doc! { "user": auth_user.id },
            doc! { "$pull": { "education": { "_id": entry_id } } },
        )
        .await?;

    if result.matched_count == 0 {
        return Err(ApiError::bad_request("there is no profile for this user"));
    }
    if result.modified_count == 0 {
        return Err(ApiError::not_found("education not found"));
    }

    let profile = profiles
        .find_one(doc! { "user": auth_user.id })
        .await?
        .ok_or_else(|| ApiError::bad_request("there is no profile for this user"))?;

    Ok(Json(ProfileResponse::from_profile(profile)))
}
