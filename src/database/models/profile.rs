use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Profile document in the `profiles` collection. `user` carries a unique
/// index, so each account owns at most one profile. Experience and education
/// entries are embedded subdocuments with their own ids, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user: ObjectId,
    pub status: String,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social: Option<SocialLinks>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    pub date: DateTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl SocialLinks {
    pub fn is_empty(&self) -> bool {
        self.youtube.is_none()
            && self.twitter.is_none()
            && self.facebook.is_none()
            && self.linkedin.is_none()
            && self.instagram.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime>,
    #[serde(default)]
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime>,
    #[serde(default)]
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
