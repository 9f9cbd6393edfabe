mod common;

use anyhow::Result;
use devlink_api::api::dto::ProfileRequest;
use devlink_api::client::{ApiClient, AlertKind, AppState, Route, Store};

#[tokio::test]
async fn failed_registration_becomes_alerts_and_a_reset_auth_slice() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = ApiClient::new(server.base_url.clone());
    let mut store = Store::new();

    // Server-side validation failure; no database involved
    store.dispatch_all(client.register("", "", "").await?);

    let state = store.state();
    assert!(
        !state.alerts.is_empty(),
        "validation errors should surface as alerts"
    );
    assert!(
        state.alerts.iter().all(|a| a.kind == AlertKind::Danger),
        "validation alerts are danger-kind"
    );
    assert_eq!(state.auth.token, None);
    assert!(!state.auth.is_authenticated);
    assert!(!state.auth.loading, "failure still settles the loading flag");

    Ok(())
}

#[tokio::test]
async fn dispatch_queue_survives_unrelated_actions() -> Result<()> {
    // Pure store behavior; mirrors how commands drive it
    let mut store = Store::new();
    assert_eq!(store.state(), &AppState::default());

    store.dispatch(devlink_api::client::Action::Navigate(Route::Posts));
    assert_eq!(store.state().route, Some(Route::Posts));
    assert!(store.state().posts.loading, "navigation must not touch other slices");

    Ok(())
}

#[tokio::test]
async fn full_client_flow_against_live_server() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await? {
        eprintln!("skipping full_client_flow_against_live_server: database unavailable");
        return Ok(());
    }

    let mut client = ApiClient::new(server.base_url.clone());
    let mut store = Store::new();

    // Register through the creator; the token lands in the auth slice
    store.dispatch_all(
        client
            .register("clientuser", &common::unique_email("clientuser"), "sekrit99")
            .await?,
    );
    let token = store.state().auth.token.clone();
    assert!(token.is_some(), "registration should store a token");
    assert!(store.state().auth.is_authenticated);
    client.set_token(token);

    // Identity load fills the user
    store.dispatch_all(client.load_user().await?);
    assert_eq!(
        store.state().auth.user.as_ref().map(|u| u.name.as_str()),
        Some("clientuser")
    );

    // Profile creation: focused profile, success alert, dashboard redirect
    let body = ProfileRequest {
        status: Some("Developer".into()),
        skills: Some("Rust, Testing".into()),
        ..Default::default()
    };
    store.dispatch_all(client.create_profile(&body, false).await?);

    let state = store.state();
    assert_eq!(
        state.profile.profile.as_ref().map(|p| p.status.as_str()),
        Some("Developer")
    );
    assert!(state
        .alerts
        .iter()
        .any(|a| a.msg == "profile created" && a.kind == AlertKind::Success));
    assert_eq!(state.route, Some(Route::Dashboard));

    // Posts: create, list, like, unlike, delete
    store.dispatch_all(client.create_post("hello from the client").await?);
    let post_id = store
        .state()
        .posts
        .posts
        .first()
        .map(|p| p.id.clone())
        .expect("created post in the list slice");
    assert!(store
        .state()
        .alerts
        .iter()
        .any(|a| a.msg == "Post Created"));

    store.dispatch_all(client.like(&post_id).await?);
    let liked = store
        .state()
        .posts
        .posts
        .iter()
        .find(|p| p.id == post_id)
        .expect("liked post still listed");
    assert_eq!(liked.likes.len(), 1);

    store.dispatch_all(client.unlike(&post_id).await?);
    let unliked = store
        .state()
        .posts
        .posts
        .iter()
        .find(|p| p.id == post_id)
        .expect("unliked post still listed");
    assert!(unliked.likes.is_empty(), "like then unlike restores the sequence");

    store.dispatch_all(client.delete_post(&post_id).await?);
    assert!(
        store.state().posts.posts.iter().all(|p| p.id != post_id),
        "deletion filters the list slice"
    );

    // Comments land on the focused post
    store.dispatch_all(client.create_post("comment target").await?);
    let target_id = store
        .state()
        .posts
        .posts
        .first()
        .map(|p| p.id.clone())
        .expect("comment target listed");

    store.dispatch_all(client.post(&target_id).await?);
    store.dispatch_all(client.add_comment(&target_id, "first!").await?);
    let focused = store.state().posts.post.as_ref().expect("focused post");
    assert_eq!(focused.comments.len(), 1);
    assert_eq!(focused.comments[0].text, "first!");

    let comment_id = focused.comments[0].id.clone();
    store.dispatch_all(client.remove_comment(&target_id, &comment_id).await?);
    let focused = store.state().posts.post.as_ref().expect("focused post");
    assert!(focused.comments.is_empty());

    // Failure path: double delete turns into a posts error, not a panic
    store.dispatch_all(client.delete_post(&post_id).await?);
    let error = store.state().posts.error.as_ref().expect("error recorded");
    assert_eq!(error.status, 404);
    assert_eq!(error.msg, "post not found");

    Ok(())
}
