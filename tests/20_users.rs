mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

/// Collect the `param` values out of a validation error body.
fn error_params(body: &serde_json::Value) -> Vec<&str> {
    body.get("errors")
        .and_then(|e| e.as_array())
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.get("param").and_then(|p| p.as_str()))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn register_rejects_empty_body_with_field_errors() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/users", server.base_url))
        .json(&json!({}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    let params = error_params(&body);
    assert!(params.contains(&"name"), "missing name error: {}", body);
    assert!(params.contains(&"email"), "missing email error: {}", body);
    assert!(params.contains(&"password"), "missing password error: {}", body);

    Ok(())
}

#[tokio::test]
async fn register_rejects_short_password() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/users", server.base_url))
        .json(&json!({
            "name": "Shorty",
            "email": common::unique_email("shorty"),
            "password": "12345"
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    let msgs: Vec<&str> = body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
                .collect()
        })
        .unwrap_or_default();
    assert!(
        msgs.iter().any(|m| m.contains("6 or more")),
        "expected password length message: {}",
        body
    );

    Ok(())
}

#[tokio::test]
async fn register_rejects_malformed_email() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/users", server.base_url))
        .json(&json!({
            "name": "Badmail",
            "email": "not-an-email",
            "password": "sekrit99"
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert!(
        error_params(&body).contains(&"email"),
        "expected email error: {}",
        body
    );

    Ok(())
}

#[tokio::test]
async fn register_returns_verifiable_token() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await? {
        eprintln!("skipping register_returns_verifiable_token: database unavailable");
        return Ok(());
    }
    let client = reqwest::Client::new();

    let token = common::register_user(&client, &server.base_url, "tokenuser").await?;

    // The embedded id must match the account GET /api/auth resolves
    let res = client
        .get(format!("{}/api/auth", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let user = res.json::<serde_json::Value>().await?;
    // Match the server's secret resolution (.env then defaults)
    dotenvy::dotenv().ok();
    let claims = devlink_api::auth::verify_token(
        &token,
        &devlink_api::config::config().security.jwt_secret,
    )?;
    assert_eq!(
        user["_id"].as_str(),
        Some(claims.user.id.as_str()),
        "token id should match the persisted user: {}",
        user
    );
    assert!(
        user["avatar"]
            .as_str()
            .is_some_and(|a| a.contains("gravatar.com")),
        "expected gravatar avatar: {}",
        user
    );
    assert!(user.get("password").is_none(), "password must never leave the API");

    Ok(())
}

#[tokio::test]
async fn register_rejects_duplicate_email() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await? {
        eprintln!("skipping register_rejects_duplicate_email: database unavailable");
        return Ok(());
    }
    let client = reqwest::Client::new();

    let email = common::unique_email("dupe");
    let payload = json!({ "name": "Dupe", "email": email, "password": "sekrit99" });

    let first = client
        .post(format!("{}/api/users", server.base_url))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(first.status(), StatusCode::OK);

    let second = client
        .post(format!("{}/api/users", server.base_url))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let body = second.json::<serde_json::Value>().await?;
    let msgs: Vec<&str> = body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
                .collect()
        })
        .unwrap_or_default();
    assert!(
        msgs.contains(&"user already exists"),
        "expected duplicate-email error: {}",
        body
    );

    Ok(())
}
