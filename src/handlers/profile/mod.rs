pub mod education;
pub mod experience;
pub mod github;

use std::collections::HashMap;

use axum::{
    extract::{Extension, Path},
    Json,
};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson, DateTime, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use crate::api::dto::{parse_skills, MessageResponse, ProfileRequest, ProfileResponse};
use crate::database::models::{Profile, User};
use crate::database::DatabaseManager;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::validation::Validator;

fn no_profile() -> ApiError {
    ApiError::bad_request("there is no profile for this user")
}

/// GET /api/profile/me - The caller's profile, owner populated
pub async fn me(Extension(auth_user): Extension<AuthUser>) -> ApiResult<Json<ProfileResponse>> {
    let profiles = DatabaseManager::profiles().await?;
    let profile = profiles
        .find_one(doc! { "user": auth_user.id })
        .await?
        .ok_or_else(no_profile)?;

    let users = DatabaseManager::users().await?;
    let owner = users
        .find_one(doc! { "_id": profile.user })
        .await?
        .ok_or_else(no_profile)?;

    Ok(Json(ProfileResponse::populated(profile, &owner)))
}

/// POST /api/profile - Create or update the caller's profile in one atomic
/// upsert keyed on the unique `user` index
pub async fn upsert(
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<ProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    Validator::new()
        .require("status", body.status.as_deref(), "Status is required")
        .require("skills", body.skills.as_deref(), "Skills is required")
        .finish()?;

    let update = doc! {
        "$set": profile_set_doc(&body)?,
        "$setOnInsert": { "date": DateTime::now() },
    };

    let profiles = DatabaseManager::profiles().await?;
    let profile = match upsert_once(&profiles, auth_user.id, update.clone()).await {
        Ok(profile) => profile,
        // A concurrent first-time upsert can lose the insert race against the
        // unique index; the retry lands on the winner's document as an update.
        Err(err) if DatabaseManager::is_duplicate_key(&err) => {
            upsert_once(&profiles, auth_user.id, update).await?
        }
        Err(err) => return Err(err.into()),
    };

    profile
        .map(|p| Json(ProfileResponse::from_profile(p)))
        .ok_or_else(|| ApiError::internal("upsert returned no document"))
}

async fn upsert_once(
    profiles: &Collection<Profile>,
    user: ObjectId,
    update: Document,
) -> Result<Option<Profile>, mongodb::error::Error> {
    profiles
        .find_one_and_update(doc! { "user": user }, update)
        .upsert(true)
        .return_document(ReturnDocument::After)
        .await
}

/// Only provided fields are written; absent ones keep their stored value.
/// `social` is rebuilt wholesale on every upsert, like the original form.
fn profile_set_doc(body: &ProfileRequest) -> Result<Document, ApiError> {
    let mut set = Document::new();

    if let Some(status) = &body.status {
        set.insert("status", status.trim());
    }
    if let Some(skills) = &body.skills {
        set.insert("skills", parse_skills(skills));
    }
    let optional_fields = [
        ("company", &body.company),
        ("website", &body.website),
        ("location", &body.location),
        ("bio", &body.bio),
        ("githubusername", &body.githubusername),
    ];
    for (key, value) in optional_fields {
        if let Some(value) = value {
            set.insert(key, value.trim());
        }
    }
    set.insert("social", to_bson(&body.social_links())?);

    Ok(set)
}

/// GET /api/profile - Every profile, owners resolved in one `$in` query
pub async fn list() -> ApiResult<Json<Vec<ProfileResponse>>> {
    let profiles_coll = DatabaseManager::profiles().await?;
    let profiles: Vec<Profile> = profiles_coll.find(doc! {}).await?.try_collect().await?;

    let owner_ids: Vec<ObjectId> = profiles.iter().map(|p| p.user).collect();
    let users = DatabaseManager::users().await?;
    let owners: Vec<User> = users
        .find(doc! { "_id": { "$in": owner_ids } })
        .await?
        .try_collect()
        .await?;
    let owners_by_id: HashMap<ObjectId, User> =
        owners.into_iter().map(|u| (u.id, u)).collect();

    let responses = profiles
        .into_iter()
        .map(|profile| match owners_by_id.get(&profile.user) {
            Some(owner) => ProfileResponse::populated(profile, owner),
            // Owner deleted mid-request; fall back to the bare id
            None => ProfileResponse::from_profile(profile),
        })
        .collect();

    Ok(Json(responses))
}

/// GET /api/profile/user/:user_id - One profile by owning user
pub async fn by_user(Path(user_id): Path<String>) -> ApiResult<Json<ProfileResponse>> {
    let owner_id = ObjectId::parse_str(&user_id).map_err(|_| no_profile())?;

    let profiles = DatabaseManager::profiles().await?;
    let profile = profiles
        .find_one(doc! { "user": owner_id })
        .await?
        .ok_or_else(no_profile)?;

    let users = DatabaseManager::users().await?;
    let owner = users
        .find_one(doc! { "_id": owner_id })
        .await?
        .ok_or_else(no_profile)?;

    Ok(Json(ProfileResponse::populated(profile, &owner)))
}

/// DELETE /api/profile - Remove the caller's posts, profile and account
pub async fn delete_account(
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Json<MessageResponse>> {
    DatabaseManager::posts()
        .await?
        .delete_many(doc! { "user": auth_user.id })
        .await?;
    DatabaseManager::profiles()
        .await?
        .delete_one(doc! { "user": auth_user.id })
        .await?;
    DatabaseManager::users()
        .await?
        .delete_one(doc! { "_id": auth_user.id })
        .await?;

    Ok(Json(MessageResponse::new("user deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_doc_keeps_only_provided_fields() {
        let body = ProfileRequest {
            status: Some("Developer".to_string()),
            skills: Some("Rust, Axum ,MongoDB".to_string()),
            company: Some("  Acme  ".to_string()),
            ..Default::default()
        };
        let set = profile_set_doc(&body).unwrap();

        assert_eq!(set.get_str("status").unwrap(), "Developer");
        assert_eq!(set.get_str("company").unwrap(), "Acme");
        assert!(!set.contains_key("website"));
        assert!(!set.contains_key("bio"));

        let skills = set.get_array("skills").unwrap();
        assert_eq!(skills.len(), 3);
        assert_eq!(skills[1].as_str(), Some("Axum"));
    }

    #[test]
    fn set_doc_always_rewrites_social() {
        let body = ProfileRequest {
            status: Some("Developer".to_string()),
            skills: Some("Rust".to_string()),
            twitter: Some("https://twitter.com/dev".to_string()),
            ..Default::default()
        };
        let set = profile_set_doc(&body).unwrap();
        let social = set.get_document("social").unwrap();
        assert_eq!(social.get_str("twitter").unwrap(), "https://twitter.com/dev");
        assert!(!social.contains_key("youtube"));

        // No links provided still resets the subdocument
        let bare = profile_set_doc(&ProfileRequest::default()).unwrap();
        assert!(bare.get_document("social").unwrap().is_empty());
    }
}
