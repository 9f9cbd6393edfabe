//! Fixture builders shared by the in-crate test modules.

pub mod fixtures {
    use chrono::{TimeZone, Utc};

    use crate::api::dto::{
        CommentResponse, PostResponse, ProfileResponse, RepoResponse, UserRef, UserResponse,
        UserSummary,
    };

    fn fixed_date() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    pub fn user_response(name: &str) -> UserResponse {
        UserResponse {
            id: "64f0aa0000000000000000aa".into(),
            name: name.into(),
            email: format!("{name}@example.com"),
            avatar: "https://www.gravatar.com/avatar/00?s=200&r=pg&d=mm".into(),
            date: fixed_date(),
        }
    }

    pub fn profile_response() -> ProfileResponse {
        ProfileResponse {
            id: "64f0bb0000000000000000bb".into(),
            user: UserRef::Populated(UserSummary {
                id: "64f0aa0000000000000000aa".into(),
                name: "dee".into(),
                avatar: "https://www.gravatar.com/avatar/00?s=200&r=pg&d=mm".into(),
            }),
            status: "Developer".into(),
            skills: vec!["Rust".into(), "MongoDB".into()],
            company: None,
            website: None,
            location: None,
            bio: None,
            githubusername: None,
            social: None,
            experience: Vec::new(),
            education: Vec::new(),
            date: fixed_date(),
        }
    }

    pub fn post_response(id: &str, text: &str) -> PostResponse {
        PostResponse {
            id: id.into(),
            user: "64f0aa0000000000000000aa".into(),
            text: text.into(),
            name: "dee".into(),
            avatar: "https://www.gravatar.com/avatar/00?s=200&r=pg&d=mm".into(),
            likes: Vec::new(),
            comments: Vec::new(),
            date: fixed_date(),
        }
    }

    pub fn comment_response(id: &str, text: &str) -> CommentResponse {
        CommentResponse {
            id: id.into(),
            user: "64f0aa0000000000000000aa".into(),
            text: text.into(),
            name: "dee".into(),
            avatar: "https://www.gravatar.com/avatar/00?s=200&r=pg&d=mm".into(),
            date: fixed_date(),
        }
    }

    pub fn repo_response(name: &str) -> RepoResponse {
        RepoResponse {
            id: 1,
            name: name.into(),
            html_url: format!("https://github.com/devlink/{name}"),
            description: Some("sample repository".into()),
            stargazers_count: 3,
            watchers_count: 3,
            forks_count: 1,
        }
    }
}
