use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::Value;

use crate::api::dto::{
    CommentRequest, CommentResponse, EducationRequest, ExperienceRequest, LikeResponse,
    PostRequest, PostResponse, ProfileRequest, ProfileResponse, RegisterRequest, RepoResponse,
    TokenResponse, UserResponse,
};

use super::actions::{Action, AlertAction, AuthAction, PostAction, ProfileAction};
use super::state::{Alert, AlertKind, RequestError, Route};

/// Action creators. Each method wraps exactly one HTTP call and returns the
/// actions the caller should dispatch; transport failures bubble up as
/// `reqwest::Error` instead.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

/// What a non-2xx response turns into: one danger alert per validation
/// entry, plus the status/message pair the error slices store.
struct Failure {
    alerts: Vec<Action>,
    error: RequestError,
}

fn failure_from(status: StatusCode, body: Option<&Value>) -> Failure {
    let mut alerts = Vec::new();
    let mut msg = status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string();

    if let Some(body) = body {
        if let Some(errors) = body.get("errors").and_then(Value::as_array) {
            for entry in errors {
                if let Some(text) = entry.get("msg").and_then(Value::as_str) {
                    alerts.push(set_alert(text, AlertKind::Danger));
                }
            }
        }
        if let Some(text) = body.get("msg").and_then(Value::as_str) {
            msg = text.to_string();
        }
    }

    Failure { alerts, error: RequestError::new(status.as_u16(), msg) }
}

async fn read_failure(response: Response) -> Failure {
    let status = response.status();
    let body: Option<Value> = response.json().await.ok();
    failure_from(status, body.as_ref())
}

fn set_alert(msg: &str, kind: AlertKind) -> Action {
    Action::Alert(AlertAction::Set(Alert::new(msg, kind)))
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    pub fn with_token(base_url: impl Into<String>, token: Option<String>) -> Self {
        let mut client = Self::new(base_url);
        client.token = token;
        client
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    // ---- auth ----

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Vec<Action>, reqwest::Error> {
        let body = RegisterRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        };
        let response = self.http.post(self.url("/api/users")).json(&body).send().await?;

        if response.status().is_success() {
            let token: TokenResponse = response.json().await?;
            Ok(vec![Action::Auth(AuthAction::RegisterSuccess { token: token.token })])
        } else {
            let mut actions = read_failure(response).await.alerts;
            actions.push(Action::Auth(AuthAction::RegisterFail));
            Ok(actions)
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Vec<Action>, reqwest::Error> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self.http.post(self.url("/api/auth")).json(&body).send().await?;

        if response.status().is_success() {
            let token: TokenResponse = response.json().await?;
            Ok(vec![Action::Auth(AuthAction::LoginSuccess { token: token.token })])
        } else {
            let mut actions = read_failure(response).await.alerts;
            actions.push(Action::Auth(AuthAction::LoginFail));
            Ok(actions)
        }
    }

    pub async fn load_user(&self) -> Result<Vec<Action>, reqwest::Error> {
        let response = self.authed(self.http.get(self.url("/api/auth"))).send().await?;

        if response.status().is_success() {
            let user: UserResponse = response.json().await?;
            Ok(vec![Action::Auth(AuthAction::UserLoaded(user))])
        } else {
            Ok(vec![Action::Auth(AuthAction::AuthError)])
        }
    }

    // ---- profile ----

    pub async fn current_profile(&self) -> Result<Vec<Action>, reqwest::Error> {
        let response = self
            .authed(self.http.get(self.url("/api/profile/me")))
            .send()
            .await?;
        self.profile_fetch(response).await
    }

    pub async fn profiles(&self) -> Result<Vec<Action>, reqwest::Error> {
        let response = self.http.get(self.url("/api/profile")).send().await?;

        if response.status().is_success() {
            let list: Vec<ProfileResponse> = response.json().await?;
            Ok(vec![Action::Profile(ProfileAction::ListLoaded(list))])
        } else {
            Ok(self.profile_failure(response).await)
        }
    }

    pub async fn profile_by_user(&self, user_id: &str) -> Result<Vec<Action>, reqwest::Error> {
        let response = self
            .http
            .get(self.url(&format!("/api/profile/user/{user_id}")))
            .send()
            .await?;
        self.profile_fetch(response).await
    }

    pub async fn github_repos(&self, username: &str) -> Result<Vec<Action>, reqwest::Error> {
        let response = self
            .http
            .get(self.url(&format!("/api/profile/github/{username}")))
            .send()
            .await?;

        if response.status().is_success() {
            let repos: Vec<RepoResponse> = response.json().await?;
            Ok(vec![Action::Profile(ProfileAction::ReposLoaded(repos))])
        } else {
            Ok(self.profile_failure(response).await)
        }
    }

    pub async fn create_profile(
        &self,
        body: &ProfileRequest,
        edit: bool,
    ) -> Result<Vec<Action>, reqwest::Error> {
        let response = self
            .authed(self.http.post(self.url("/api/profile")))
            .json(body)
            .send()
            .await?;

        if response.status().is_success() {
            let profile: ProfileResponse = response.json().await?;
            let note = if edit { "profile updated" } else { "profile created" };
            let mut actions = vec![
                Action::Profile(ProfileAction::Loaded(profile)),
                set_alert(note, AlertKind::Success),
            ];
            if !edit {
                actions.push(Action::Navigate(Route::Dashboard));
            }
            Ok(actions)
        } else {
            Ok(self.profile_failure(response).await)
        }
    }

    pub async fn add_experience(
        &self,
        body: &ExperienceRequest,
    ) -> Result<Vec<Action>, reqwest::Error> {
        let response = self
            .authed(self.http.put(self.url("/api/profile/experience")))
            .json(body)
            .send()
            .await?;
        self.entry_added(response, "Experience added").await
    }

    pub async fn add_education(
        &self,
        body: &EducationRequest,
    ) -> Result<Vec<Action>, reqwest::Error> {
        let response = self
            .authed(self.http.put(self.url("/api/profile/education")))
            .json(body)
            .send()
            .await?;
        self.entry_added(response, "Education added").await
    }

    pub async fn delete_experience(&self, id: &str) -> Result<Vec<Action>, reqwest::Error> {
        let response = self
            .authed(self.http.delete(self.url(&format!("/api/profile/experience/{id}"))))
            .send()
            .await?;
        self.entry_removed(response, "Experience Removed").await
    }

    pub async fn delete_education(&self, id: &str) -> Result<Vec<Action>, reqwest::Error> {
        let response = self
            .authed(self.http.delete(self.url(&format!("/api/profile/education/{id}"))))
            .send()
            .await?;
        self.entry_removed(response, "Education Removed").await
    }

    pub async fn delete_account(&self) -> Result<Vec<Action>, reqwest::Error> {
        let response = self
            .authed(self.http.delete(self.url("/api/profile")))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(vec![
                Action::Profile(ProfileAction::Cleared),
                Action::Auth(AuthAction::AccountDeleted),
                set_alert("Your Account has been deleted", AlertKind::Info),
            ])
        } else {
            Ok(self.profile_failure(response).await)
        }
    }

    // ---- posts ----

    pub async fn posts(&self) -> Result<Vec<Action>, reqwest::Error> {
        let response = self.authed(self.http.get(self.url("/api/posts"))).send().await?;

        if response.status().is_success() {
            let posts: Vec<PostResponse> = response.json().await?;
            Ok(vec![Action::Post(PostAction::ListLoaded(posts))])
        } else {
            Ok(self.post_failure(response).await)
        }
    }

    pub async fn post(&self, id: &str) -> Result<Vec<Action>, reqwest::Error> {
        let response = self
            .authed(self.http.get(self.url(&format!("/api/posts/{id}"))))
            .send()
            .await?;

        if response.status().is_success() {
            let post: PostResponse = response.json().await?;
            Ok(vec![Action::Post(PostAction::Loaded(post))])
        } else {
            Ok(self.post_failure(response).await)
        }
    }

    pub async fn create_post(&self, text: &str) -> Result<Vec<Action>, reqwest::Error> {
        let body = PostRequest { text: Some(text.to_string()) };
        let response = self
            .authed(self.http.post(self.url("/api/posts")))
            .json(&body)
            .send()
            .await?;

        if response.status().is_success() {
            let post: PostResponse = response.json().await?;
            Ok(vec![
                Action::Post(PostAction::Created(post)),
                set_alert("Post Created", AlertKind::Success),
            ])
        } else {
            Ok(self.post_failure(response).await)
        }
    }

    pub async fn delete_post(&self, id: &str) -> Result<Vec<Action>, reqwest::Error> {
        let response = self
            .authed(self.http.delete(self.url(&format!("/api/posts/{id}"))))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(vec![
                Action::Post(PostAction::Deleted(id.to_string())),
                set_alert("Post Removed", AlertKind::Success),
            ])
        } else {
            Ok(self.post_failure(response).await)
        }
    }

    pub async fn like(&self, id: &str) -> Result<Vec<Action>, reqwest::Error> {
        let response = self
            .authed(self.http.put(self.url(&format!("/api/posts/like/{id}"))))
            .send()
            .await?;
        self.likes_updated(id, response).await
    }

    pub async fn unlike(&self, id: &str) -> Result<Vec<Action>, reqwest::Error> {
        let response = self
            .authed(self.http.put(self.url(&format!("/api/posts/unlike/{id}"))))
            .send()
            .await?;
        self.likes_updated(id, response).await
    }

    pub async fn add_comment(
        &self,
        post_id: &str,
        text: &str,
    ) -> Result<Vec<Action>, reqwest::Error> {
        let body = CommentRequest { text: Some(text.to_string()) };
        let response = self
            .authed(self.http.post(self.url(&format!("/api/posts/comments/{post_id}"))))
            .json(&body)
            .send()
            .await?;

        if response.status().is_success() {
            let comments: Vec<CommentResponse> = response.json().await?;
            Ok(vec![
                Action::Post(PostAction::CommentAdded(comments)),
                set_alert("Comment Added", AlertKind::Success),
            ])
        } else {
            Ok(self.post_failure(response).await)
        }
    }

    pub async fn remove_comment(
        &self,
        post_id: &str,
        comment_id: &str,
    ) -> Result<Vec<Action>, reqwest::Error> {
        let response = self
            .authed(
                self.http
                    .delete(self.url(&format!("/api/posts/comments/{post_id}/{comment_id}"))),
            )
            .send()
            .await?;

        if response.status().is_success() {
            let comments: Vec<CommentResponse> = response.json().await?;
            Ok(vec![
                Action::Post(PostAction::CommentRemoved(comments)),
                set_alert("Comment Removed", AlertKind::Success),
            ])
        } else {
            Ok(self.post_failure(response).await)
        }
    }

    // ---- shared tails ----

    async fn profile_fetch(&self, response: Response) -> Result<Vec<Action>, reqwest::Error> {
        if response.status().is_success() {
            let profile: ProfileResponse = response.json().await?;
            Ok(vec![Action::Profile(ProfileAction::Loaded(profile))])
        } else {
            Ok(self.profile_failure(response).await)
        }
    }

    async fn entry_added(
        &self,
        response: Response,
        note: &str,
    ) -> Result<Vec<Action>, reqwest::Error> {
        if response.status().is_success() {
            let profile: ProfileResponse = response.json().await?;
            Ok(vec![
                Action::Profile(ProfileAction::Updated(profile)),
                set_alert(note, AlertKind::Success),
                Action::Navigate(Route::Dashboard),
            ])
        } else {
            Ok(self.profile_failure(response).await)
        }
    }

    async fn entry_removed(
        &self,
        response: Response,
        note: &str,
    ) -> Result<Vec<Action>, reqwest::Error> {
        if response.status().is_success() {
            let profile: ProfileResponse = response.json().await?;
            Ok(vec![
                Action::Profile(ProfileAction::Updated(profile)),
                set_alert(note, AlertKind::Success),
            ])
        } else {
            Ok(self.profile_failure(response).await)
        }
    }

    async fn likes_updated(
        &self,
        id: &str,
        response: Response,
    ) -> Result<Vec<Action>, reqwest::Error> {
        if response.status().is_success() {
            let likes: Vec<LikeResponse> = response.json().await?;
            Ok(vec![Action::Post(PostAction::LikesUpdated {
                id: id.to_string(),
                likes,
            })])
        } else {
            Ok(self.post_failure(response).await)
        }
    }

    async fn profile_failure(&self, response: Response) -> Vec<Action> {
        let failure = read_failure(response).await;
        let mut actions = failure.alerts;
        actions.push(Action::Profile(ProfileAction::Error(failure.error)));
        actions
    }

    async fn post_failure(&self, response: Response) -> Vec<Action> {
        let failure = read_failure(response).await;
        let mut actions = failure.alerts;
        actions.push(Action::Post(PostAction::Error(failure.error)));
        actions
    }
}
