use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::User;

/// Post document in the `posts` collection. Author `name`/`avatar` are
/// denormalized at write time and never re-synced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user: ObjectId,
    pub text: String,
    pub name: String,
    pub avatar: String,
    #[serde(default)]
    pub likes: Vec<Like>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub date: DateTime,
}

/// One like; at most one per user, enforced by the conditional update filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub user: ObjectId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user: ObjectId,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub date: DateTime,
}

impl Post {
    pub fn new(author: &User, text: String) -> Self {
        Self {
            id: ObjectId::new(),
            user: author.id,
            text,
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            likes: Vec::new(),
            comments: Vec::new(),
            date: DateTime::now(),
        }
    }
}

impl Comment {
    pub fn new(author: &User, text: String) -> Self {
        Self {
            id: ObjectId::new(),
            user: author.id,
            text,
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            date: DateTime::now(),
        }
    }
}
