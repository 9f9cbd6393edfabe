mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn missing_token_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/auth", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["msg"], "no token", "unexpected body: {}", body);

    Ok(())
}

#[tokio::test]
async fn garbage_token_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/auth", server.base_url))
        .bearer_auth("not.a.jwt")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["msg"], "token is not valid", "unexpected body: {}", body);

    Ok(())
}

#[tokio::test]
async fn wrong_secret_token_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Valid JWT shape, signed with a secret the server does not use
    let forged = devlink_api::auth::sign_token(
        "64f0aa0000000000000000aa",
        "nobody-elses-secret",
        3600,
    )?;

    let res = client
        .get(format!("{}/api/auth", server.base_url))
        .bearer_auth(&forged)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["msg"], "token is not valid", "unexpected body: {}", body);

    Ok(())
}

#[tokio::test]
async fn every_protected_route_wants_a_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let checks = [
        client.get(format!("{}/api/profile/me", server.base_url)),
        client.post(format!("{}/api/profile", server.base_url)).json(&json!({})),
        client.delete(format!("{}/api/profile", server.base_url)),
        client.put(format!("{}/api/profile/experience", server.base_url)).json(&json!({})),
        client.get(format!("{}/api/posts", server.base_url)),
        client.post(format!("{}/api/posts", server.base_url)).json(&json!({})),
        client.put(format!("{}/api/posts/like/64f0aa0000000000000000aa", server.base_url)),
    ];

    for request in checks {
        let res = request.send().await?;
        assert_eq!(
            res.status(),
            StatusCode::UNAUTHORIZED,
            "protected route let an anonymous request through"
        );
    }

    Ok(())
}

#[tokio::test]
async fn login_validates_its_body() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth", server.base_url))
        .json(&json!({ "email": "nope" }))
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
        msgs.contains(&"Password is required"),
        "expected password error: {}",
        body
    );

    Ok(())
}

#[tokio::test]
async fn login_rejects_unknown_account_and_wrong_password_alike() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await? {
        eprintln!("skipping login_rejects_unknown_account_and_wrong_password_alike: database unavailable");
        return Ok(());
    }
    let client = reqwest::Client::new();

    // Unknown account
    let res = client
        .post(format!("{}/api/auth", server.base_url))
        .json(&json!({
            "email": common::unique_email("ghost"),
            "password": "sekrit99"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let unknown = res.json::<serde_json::Value>().await?;

    // Known account, wrong password
    let email = common::unique_email("lockedout");
    let register = client
        .post(format!("{}/api/users", server.base_url))
        .json(&json!({ "name": "Locked", "email": email, "password": "sekrit99" }))
        .send()
        .await?;
    assert_eq!(register.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/api/auth", server.base_url))
        .json(&json!({ "email": email, "password": "wrong-password" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let wrong = res.json::<serde_json::Value>().await?;

    // Same body both ways, no account probing
    assert_eq!(unknown, wrong, "failure bodies should not differ");

    Ok(())
}

#[tokio::test]
async fn login_round_trip_issues_a_working_token() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await? {
        eprintln!("skipping login_round_trip_issues_a_working_token: database unavailable");
        return Ok(());
    }
    let client = reqwest::Client::new();

    let email = common::unique_email("roundtrip");
    let register = client
        .post(format!("{}/api/users", server.base_url))
        .json(&json!({ "name": "Round Trip", "email": email, "password": "sekrit99" }))
        .send()
        .await?;
    assert_eq!(register.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/api/auth", server.base_url))
        .json(&json!({ "email": email, "password": "sekrit99" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let token = res.json::<serde_json::Value>().await?["token"]
        .as_str()
        .map(String::from)
        .expect("token in login response");

    let whoami = client
        .get(format!("{}/api/auth", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(whoami.status(), StatusCode::OK);

    let user = whoami.json::<serde_json::Value>().await?;
    assert_eq!(user["email"].as_str(), Some(email.as_str()));

    Ok(())
}
