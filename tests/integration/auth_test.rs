//! Integration tests for the authentication endpoints.

use reqwest::{Method, StatusCode};
use serde_json::{Value, json};

use taskhub_client::{SessionController, TokenStore};

use crate::helpers::TestApp;

#[tokio::test]
async fn register_creates_user_and_returns_bearer_token() {
    let app = TestApp::spawn().await;
    let (client, _store) = app.client();

    let body = json!({
        "name": "Ada",
        "email": "ada@example.com",
        "password": "secret123",
        "password_confirmation": "secret123",
    });
    let response = client
        .execute(Method::POST, "/register", Some(&body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert!(body["token"].as_str().unwrap().starts_with("Bearer "));
    // The password hash must never appear on the wire.
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let app = TestApp::spawn().await;
    let (client, _store) = app.client();
    app.register_user(&client, "Ada", "dup@example.com", "secret123")
        .await;

    let body = json!({
        "name": "Other",
        "email": "dup@example.com",
        "password": "secret123",
        "password_confirmation": "secret123",
    });
    let response = client
        .execute(Method::POST, "/register", Some(&body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "The email has already been taken");
}

#[tokio::test]
async fn register_rejects_invalid_payload() {
    let app = TestApp::spawn().await;
    let (client, _store) = app.client();

    // Malformed email and a too-short password.
    let body = json!({
        "name": "Ada",
        "email": "not-an-email",
        "password": "abc",
        "password_confirmation": "abc",
    });
    let response = client
        .execute(Method::POST, "/register", Some(&body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn register_rejects_password_below_configured_minimum() {
    let app = TestApp::spawn().await;
    let (client, _store) = app.client();

    let body = json!({
        "name": "Ada",
        "email": "shortpw@example.com",
        "password": "abc",
        "password_confirmation": "abc",
    });
    let response = client
        .execute(Method::POST, "/register", Some(&body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Password must be at least 6 characters");
}

#[tokio::test]
async fn login_returns_token_pair_and_user() {
    let app = TestApp::spawn().await;
    let (client, _store) = app.client();
    app.register_user(&client, "Ada", "login@example.com", "secret123")
        .await;

    let body = json!({ "email": "login@example.com", "password": "secret123" });
    let response = client
        .execute(Method::POST, "/login", Some(&body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(body["access_token"].as_str().is_some());
    assert!(body["refresh_token"].as_str().is_some());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);
    assert_eq!(body["user"]["email"], "login@example.com");
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let app = TestApp::spawn().await;
    let (client, _store) = app.client();
    app.register_user(&client, "Ada", "wrongpw@example.com", "secret123")
        .await;

    let body = json!({ "email": "wrongpw@example.com", "password": "nope-nope" });
    let response = client
        .execute(Method::POST, "/login", Some(&body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid credential");
}

#[tokio::test]
async fn login_rejects_unknown_email() {
    let app = TestApp::spawn().await;
    let (client, _store) = app.client();

    let body = json!({ "email": "nobody@example.com", "password": "secret123" });
    let response = client
        .execute(Method::POST, "/login", Some(&body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid credential");
}

#[tokio::test]
async fn me_returns_current_user() {
    let app = TestApp::spawn().await;
    let (client, store) = app.client();
    let user_id = app.signed_in_user(&client, &store, "me@example.com").await;

    let response = client.execute(Method::GET, "/me", None).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], user_id.to_string());
    assert_eq!(body["email"], "me@example.com");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn me_without_token_is_unauthorized() {
    let app = TestApp::spawn().await;
    let (client, _store) = app.client();

    let response = client.execute(Method::GET, "/me", None).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Token not found");
}

#[tokio::test]
async fn me_with_garbage_token_is_unauthorized() {
    let app = TestApp::spawn().await;
    let (client, store) = app.client();
    store.set_access_token("not.a.jwt").unwrap();
    // No refresh token either, so the pipeline cannot recover.
    let response = client.execute(Method::GET, "/me", None).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Token is invalid");
}

#[tokio::test]
async fn refresh_issues_working_access_token() {
    let app = TestApp::spawn().await;
    let (client, store) = app.client();
    app.register_user(&client, "Ada", "refresh@example.com", "secret123")
        .await;
    let (_access, refresh) = app.login(&client, "refresh@example.com", "secret123").await;

    let body = json!({ "refresh_token": refresh });
    let response = client
        .execute(Method::POST, "/refresh-token", Some(&body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    let new_access = body["access_token"].as_str().unwrap().to_string();

    store.set_access_token(&new_access).unwrap();
    let me = client.execute(Method::GET, "/me", None).await.unwrap();
    assert_eq!(me.status(), StatusCode::OK);
}

#[tokio::test]
async fn refresh_rejects_access_token_in_place_of_refresh_token() {
    let app = TestApp::spawn().await;
    let (client, _store) = app.client();
    app.register_user(&client, "Ada", "swap@example.com", "secret123")
        .await;
    let (access, _refresh) = app.login(&client, "swap@example.com", "secret123").await;

    let body = json!({ "refresh_token": access });
    let response = client
        .execute(Method::POST, "/refresh-token", Some(&body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid refresh token");
}

#[tokio::test]
async fn logout_revokes_the_access_token() {
    let app = TestApp::spawn().await;
    let (client, store) = app.client();
    app.signed_in_user(&client, &store, "logout@example.com")
        .await;

    let response = client.execute(Method::POST, "/logout", None).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Logout success");

    // The revoked token must be refused even though it has not expired.
    // Drop the refresh token so the pipeline cannot transparently recover.
    store.set_refresh_token("").unwrap();
    let me = client.execute(Method::GET, "/me", None).await.unwrap();
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_controller_full_lifecycle() {
    let app = TestApp::spawn().await;
    let (client, store) = app.client();
    app.register_user(&client, "Ada", "session@example.com", "secret123")
        .await;

    let session = SessionController::new(client);

    let user = session.login("session@example.com", "secret123").await.unwrap();
    assert_eq!(user.email, "session@example.com");
    assert!(session.current_user().await.is_some());
    assert!(!store.access_token().unwrap().is_empty());
    assert!(!store.refresh_token().unwrap().is_empty());

    let restored = session.fetch_current_user().await.unwrap().unwrap();
    assert_eq!(restored.email, "session@example.com");

    session.logout().await.unwrap();
    assert!(session.current_user().await.is_none());
    assert_eq!(store.access_token().unwrap(), "");
    assert_eq!(store.refresh_token().unwrap(), "");
}
