pub mod github;

pub use github::{GithubError, GithubService};
