//! Wire contract: request bodies arrive as loosely-optional fields so the
//! validator can report per-field errors, responses are explicit types with
//! hex ids and RFC 3339 dates. The embedded client deserializes the same
//! response types the server serializes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::database::models::{
    Comment, EducationEntry, ExperienceEntry, Like, Post, Profile, SocialLinks, User,
};

// ---------------------------------------------------------------------------
// Requests

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Flat profile form; `skills` is a comma-separated string on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRequest {
    pub status: Option<String>,
    pub skills: Option<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

impl ProfileRequest {
    pub fn social_links(&self) -> SocialLinks {
        SocialLinks {
            youtube: self.youtube.clone(),
            twitter: self.twitter.clone(),
            facebook: self.facebook.clone(),
            linkedin: self.linkedin.clone(),
            instagram: self.instagram.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationRequest {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub fieldofstudy: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostRequest {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentRequest {
    pub text: Option<String>,
}

/// Split a comma-separated skills string into a trimmed ordered list,
/// dropping empty segments.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Entry dates arrive as RFC 3339 or bare `YYYY-MM-DD` form values.
pub fn parse_entry_date(raw: &str) -> Option<mongodb::bson::DateTime> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(mongodb::bson::DateTime::from_chrono(dt.with_timezone(&Utc)));
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?.and_utc();
    Some(mongodb::bson::DateTime::from_chrono(midnight))
}

// ---------------------------------------------------------------------------
// Responses

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Account minus the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            date: user.date.to_chrono(),
        }
    }
}

/// Owning user reference: a bare id, or `{_id, name, avatar}` when the
/// operation populates it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum UserRef {
    Populated(UserSummary),
    Id(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: UserRef,
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
    pub experience: Vec<ExperienceResponse>,
    #[serde(default)]
    pub education: Vec<EducationResponse>,
    pub date: DateTime<Utc>,
}

impl ProfileResponse {
    fn build(profile: Profile, user: UserRef) -> Self {
        Self {
            id: profile.id.to_hex(),
            user,
            status: profile.status,
            skills: profile.skills,
            company: profile.company,
            website: profile.website,
            location: profile.location,
            bio: profile.bio,
            githubusername: profile.githubusername,
            social: profile.social,
            experience: profile.experience.into_iter().map(Into::into).collect(),
            education: profile.education.into_iter().map(Into::into).collect(),
            date: profile.date.to_chrono(),
        }
    }

    /// Owner as a bare id (upsert and entry mutations respond this way).
    pub fn from_profile(profile: Profile) -> Self {
        let user = UserRef::Id(profile.user.to_hex());
        Self::build(profile, user)
    }

    /// Owner populated with name and avatar (read endpoints).
    pub fn populated(profile: Profile, owner: &User) -> Self {
        let user = UserRef::Populated(UserSummary {
            id: owner.id.to_hex(),
            name: owner.name.clone(),
            avatar: owner.avatar.clone(),
        });
        Self::build(profile, user)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperienceResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<ExperienceEntry> for ExperienceResponse {
    fn from(entry: ExperienceEntry) -> Self {
        Self {
            id: entry.id.to_hex(),
            title: entry.title,
            company: entry.company,
            location: entry.location,
            from: entry.from.to_chrono(),
            to: entry.to.map(|dt| dt.to_chrono()),
            current: entry.current,
            description: entry.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EducationResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<EducationEntry> for EducationResponse {
    fn from(entry: EducationEntry) -> Self {
        Self {
            id: entry.id.to_hex(),
            school: entry.school,
            degree: entry.degree,
            fieldofstudy: entry.fieldofstudy,
            from: entry.from.to_chrono(),
            to: entry.to.map(|dt| dt.to_chrono()),
            current: entry.current,
            description: entry.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub text: String,
    pub name: String,
    pub avatar: String,
    #[serde(default)]
    pub likes: Vec<LikeResponse>,
    #[serde(default)]
    pub comments: Vec<CommentResponse>,
    pub date: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_hex(),
            user: post.user.to_hex(),
            text: post.text,
            name: post.name,
            avatar: post.avatar,
            likes: post.likes.into_iter().map(Into::into).collect(),
            comments: post.comments.into_iter().map(Into::into).collect(),
            date: post.date.to_chrono(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LikeResponse {
    pub user: String,
}

impl From<Like> for LikeResponse {
    fn from(like: Like) -> Self {
        Self { user: like.user.to_hex() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_hex(),
            user: comment.user.to_hex(),
            text: comment.text,
            name: comment.name,
            avatar: comment.avatar,
            date: comment.date.to_chrono(),
        }
    }
}

/// Subset of the GitHub repository listing the profile page renders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepoResponse {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
}
