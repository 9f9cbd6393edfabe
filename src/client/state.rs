use serde::{Deserialize, Serialize};

use crate::api::dto::{PostResponse, ProfileResponse, RepoResponse, UserResponse};

/// Full client state tree. Reducers consume the prior tree and return the
/// next one; the store holds the only live copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub auth: AuthState,
    pub profile: ProfileState,
    pub posts: PostsState,
    pub alerts: Vec<Alert>,
    pub route: Option<Route>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub user: Option<UserResponse>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            token: None,
            is_authenticated: false,
            loading: true,
            user: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileState {
    pub profile: Option<ProfileResponse>,
    pub profiles: Vec<ProfileResponse>,
    pub repos: Vec<RepoResponse>,
    pub loading: bool,
    pub error: Option<RequestError>,
}

impl Default for ProfileState {
    fn default() -> Self {
        Self {
            profile: None,
            profiles: Vec::new(),
            repos: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostsState {
    pub posts: Vec<PostResponse>,
    pub post: Option<PostResponse>,
    pub loading: bool,
    pub error: Option<RequestError>,
}

impl Default for PostsState {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            post: None,
            loading: true,
            error: None,
        }
    }
}

/// Transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub msg: String,
    pub kind: AlertKind,
}

impl Alert {
    pub fn new(msg: impl Into<String>, kind: AlertKind) -> Self {
        Self {
            id: mongodb::bson::oid::ObjectId::new().to_hex(),
            msg: msg.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Danger,
    Info,
}

/// Redirects are data, consumed by whatever renders the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Login,
    Posts,
}

/// Failed request as the error slices store it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    pub status: u16,
    pub msg: String,
}

impl RequestError {
    pub fn new(status: u16, msg: impl Into<String>) -> Self {
        Self { status, msg: msg.into() }
    }
}
