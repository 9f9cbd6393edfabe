pub mod auth;
pub mod post;
pub mod profile;

use crate::cli::config::{self, SessionConfig};
use crate::client::ApiClient;

/// Build an API client from the saved session. `DEVLINK_API_URL` overrides
/// the stored base URL without touching the session file.
pub fn api_client() -> anyhow::Result<(ApiClient, SessionConfig)> {
    let session = config::load_session()?;
    let base_url =
        std::env::var("DEVLINK_API_URL").unwrap_or_else(|_| session.base_url.clone());
    let client = ApiClient::with_token(base_url, session.token.clone());
    Ok((client, session))
}
