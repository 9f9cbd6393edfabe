use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Account document in the `users` collection. `password` holds the PHC
/// hash string, never the plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar: String,
    pub date: DateTime,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String, avatar: String) -> Self {
        Self {
            id: ObjectId::new(),
            name,
            email,
            password: password_hash,
            avatar,
            date: DateTime::now(),
        }
    }
}
