use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};

use crate::api::dto::RepoResponse;
use crate::config;

#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    #[error("github request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("github responded with status {0}")]
    Status(reqwest::StatusCode),
}

/// Read-side proxy for a user's public GitHub repositories.
pub struct GithubService {
    http: reqwest::Client,
    api_base: String,
    token: Option<String>,
    per_page: u32,
}

impl GithubService {
    pub fn from_config() -> Self {
        let github = &config::config().github;
        Self {
            http: reqwest::Client::new(),
            api_base: github.api_base.clone(),
            token: github.token.clone(),
            per_page: github.repos_per_page,
        }
    }

    fn repos_url(&self, username: &str) -> String {
        format!("{}/users/{}/repos", self.api_base.trim_end_matches('/'), username)
    }

    /// Fetch the most recently created repos. Any transport failure or
    /// non-success status is an error; the handler folds both into 404.
    pub async fn recent_repos(&self, username: &str) -> Result<Vec<RepoResponse>, GithubError> {
        let mut request = self
            .http
            .get(self.repos_url(username))
            .query(&[
                ("per_page", self.per_page.to_string()),
                ("sort", "created:asc".to_string()),
            ])
            .header(USER_AGENT, concat!("devlink-api/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/vnd.github+json");

        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("token {}", token));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(GithubError::Status(response.status()));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(base: &str) -> GithubService {
        GithubService {
            http: reqwest::Client::new(),
            api_base: base.to_string(),
            token: None,
            per_page: 5,
        }
    }

    #[test]
    fn builds_repo_listing_url() {
        assert_eq!(
            service("https://api.github.com").repos_url("octocat"),
            "https://api.github.com/users/octocat/repos"
        );
        // Trailing slash in config does not double up
        assert_eq!(
            service("https://api.github.com/").repos_url("octocat"),
            "https://api.github.com/users/octocat/repos"
        );
    }
}
