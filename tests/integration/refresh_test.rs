//! Integration tests for the token-refresh pipeline.
//!
//! The test server stalls inside `/refresh-token` (see
//! `helpers::REFRESH_DELAY`), so concurrent 401 handlers reliably pile up
//! behind the in-flight refresh instead of racing past it.

use reqwest::{Method, StatusCode};
use serde_json::Value;

use taskhub_client::TokenStore;

use crate::helpers::{TestApp, expired_access_token, refresh_token_for};

#[tokio::test]
async fn expired_token_is_refreshed_transparently() {
    let app = TestApp::spawn().await;
    let (client, store) = app.client();
    let user_id = app
        .signed_in_user(&client, &store, "stale@example.com")
        .await;

    // Replace the valid access token with one that expired an hour ago.
    let stale = expired_access_token(user_id, "stale@example.com");
    store.set_access_token(&stale).unwrap();

    let response = client.execute(Method::GET, "/me", None).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["email"], "stale@example.com");

    assert_eq!(app.refresh_calls(), 1);
    // The refreshed token was persisted for later requests.
    assert_ne!(store.access_token().unwrap(), stale);
    assert!(!store.access_token().unwrap().is_empty());
}

#[tokio::test]
async fn subsequent_requests_reuse_the_refreshed_token() {
    let app = TestApp::spawn().await;
    let (client, store) = app.client();
    let user_id = app
        .signed_in_user(&client, &store, "reuse@example.com")
        .await;
    store
        .set_access_token(&expired_access_token(user_id, "reuse@example.com"))
        .unwrap();

    let first = client.execute(Method::GET, "/me", None).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = client.execute(Method::GET, "/me", None).await.unwrap();
    assert_eq!(second.status(), StatusCode::OK);

    // Only the first request needed the refresh endpoint.
    assert_eq!(app.refresh_calls(), 1);
}

#[tokio::test]
async fn concurrent_requests_share_a_single_refresh() {
    let app = TestApp::spawn().await;
    let (client, store) = app.client();
    let user_id = app
        .signed_in_user(&client, &store, "burst@example.com")
        .await;
    store
        .set_access_token(&expired_access_token(user_id, "burst@example.com"))
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..5 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.execute(Method::GET, "/me", None).await
        }));
    }

    for handle in handles {
        let response = handle.await.unwrap().unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Five rejected requests, one refresh call.
    assert_eq!(app.refresh_calls(), 1);
}

#[tokio::test]
async fn failed_refresh_rejects_all_waiters_and_keeps_tokens() {
    let app = TestApp::spawn().await;
    let (client, store) = app.client();
    let user_id = app
        .signed_in_user(&client, &store, "dead@example.com")
        .await;

    let stale = expired_access_token(user_id, "dead@example.com");
    store.set_access_token(&stale).unwrap();
    store.set_refresh_token("not-a-valid-refresh-token").unwrap();

    let mut handles = Vec::new();
    for _ in 0..3 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.execute(Method::GET, "/me", None).await
        }));
    }

    for handle in handles {
        let err = handle.await.unwrap().unwrap_err();
        assert!(err.is_unauthorized(), "expected 401 failure, got {err}");
    }

    assert_eq!(app.refresh_calls(), 1);
    // A failed refresh must not clobber the stored tokens.
    assert_eq!(store.access_token().unwrap(), stale);
    assert_eq!(store.refresh_token().unwrap(), "not-a-valid-refresh-token");
}

#[tokio::test]
async fn second_401_after_replay_is_returned_unmodified() {
    let app = TestApp::spawn().await;
    let (client, store) = app.client();

    // Tokens for a user that does not exist: the refresh succeeds (the
    // token signature and type are valid) but the replayed /me still
    // fails its user lookup. The pipeline must surface that second 401
    // instead of refreshing again.
    let ghost = uuid::Uuid::new_v4();
    store
        .set_access_token(&expired_access_token(ghost, "ghost@example.com"))
        .unwrap();
    store
        .set_refresh_token(&refresh_token_for(ghost, "ghost@example.com"))
        .unwrap();

    let response = client.execute(Method::GET, "/me", None).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.refresh_calls(), 1);
}

#[tokio::test]
async fn unauthenticated_401_is_returned_without_refresh() {
    let app = TestApp::spawn().await;
    let (client, _store) = app.client();

    let response = client.execute(Method::GET, "/tasks", None).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.refresh_calls(), 0);
}

#[tokio::test]
async fn missing_refresh_token_surfaces_the_original_401() {
    let app = TestApp::spawn().await;
    let (client, store) = app.client();
    let user_id = app
        .signed_in_user(&client, &store, "norefresh@example.com")
        .await;

    store
        .set_access_token(&expired_access_token(user_id, "norefresh@example.com"))
        .unwrap();
    store.set_refresh_token("").unwrap();

    let response = client.execute(Method::GET, "/me", None).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Token has expired");
    assert_eq!(app.refresh_calls(), 0);
}

#[tokio::test]
async fn non_401_responses_do_not_trigger_refresh() {
    let app = TestApp::spawn().await;
    let (client, store) = app.client();
    app.signed_in_user(&client, &store, "notfound@example.com")
        .await;

    let response = client
        .execute(
            Method::GET,
            &format!("/tasks/{}", uuid::Uuid::new_v4()),
            None,
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.refresh_calls(), 0);
}
