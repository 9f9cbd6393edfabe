use crate::api::dto::{
    CommentResponse, LikeResponse, PostResponse, ProfileResponse, RepoResponse, UserResponse,
};

use super::state::{Alert, RequestError, Route};

/// Every state transition is a message. Creators build these; the store
/// feeds them through the reducers in dispatch order.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(AuthAction),
    Profile(ProfileAction),
    Post(PostAction),
    Alert(AlertAction),
    Navigate(Route),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    RegisterSuccess { token: String },
    RegisterFail,
    LoginSuccess { token: String },
    LoginFail,
    UserLoaded(UserResponse),
    AuthError,
    Logout,
    AccountDeleted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileAction {
    /// Focused profile fetched (own or another user's).
    Loaded(ProfileResponse),
    /// Focused profile rewritten by an upsert or entry change.
    Updated(ProfileResponse),
    ListLoaded(Vec<ProfileResponse>),
    ReposLoaded(Vec<RepoResponse>),
    Cleared,
    Error(RequestError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PostAction {
    ListLoaded(Vec<PostResponse>),
    Loaded(PostResponse),
    Created(PostResponse),
    /// Carries the deleted post's id.
    Deleted(String),
    LikesUpdated { id: String, likes: Vec<LikeResponse> },
    CommentAdded(Vec<CommentResponse>),
    CommentRemoved(Vec<CommentResponse>),
    Error(RequestError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlertAction {
    Set(Alert),
    /// Carries the alert id to drop.
    Remove(String),
}
