//! Integration tests for the task endpoints.

use reqwest::{Method, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use taskhub_client::TaskClient;
use taskhub_entity::{TaskStatus, UpdateTask};

use crate::helpers::TestApp;

#[tokio::test]
async fn create_task_assigns_creator_from_token() {
    let app = TestApp::spawn().await;
    let (client, store) = app.client();
    let user_id = app
        .signed_in_user(&client, &store, "creator@example.com")
        .await;

    // A spoofed create_by in the body must be ignored.
    let body = json!({
        "task_name": "Write report",
        "status": 0,
        "create_by": Uuid::new_v4(),
    });
    let response = client
        .execute(Method::POST, "/tasks", Some(&body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["task_name"], "Write report");
    assert_eq!(body["status"], 0);
    assert_eq!(body["create_by"], user_id.to_string());
}

#[tokio::test]
async fn create_task_rejects_blank_name() {
    let app = TestApp::spawn().await;
    let (client, store) = app.client();
    app.signed_in_user(&client, &store, "blank@example.com")
        .await;

    let body = json!({ "task_name": "", "status": 0 });
    let response = client
        .execute(Method::POST, "/tasks", Some(&body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn list_returns_created_tasks() {
    let app = TestApp::spawn().await;
    let (client, store) = app.client();
    app.signed_in_user(&client, &store, "list@example.com")
        .await;

    let tasks = TaskClient::new(client.clone());
    tasks.create("First", TaskStatus::Todo).await.unwrap();
    tasks.create("Second", TaskStatus::InProgress).await.unwrap();

    let all = tasks.list().await.unwrap();
    assert_eq!(all.len(), 2);
    let names: Vec<_> = all.iter().map(|t| t.task_name.as_str()).collect();
    assert!(names.contains(&"First"));
    assert!(names.contains(&"Second"));
}

#[tokio::test]
async fn get_returns_task_by_id() {
    let app = TestApp::spawn().await;
    let (client, store) = app.client();
    app.signed_in_user(&client, &store, "get@example.com").await;

    let tasks = TaskClient::new(client.clone());
    let created = tasks.create("Find me", TaskStatus::Todo).await.unwrap();

    let fetched = tasks.get(created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.task_name, "Find me");
}

#[tokio::test]
async fn get_missing_task_is_not_found() {
    let app = TestApp::spawn().await;
    let (client, store) = app.client();
    app.signed_in_user(&client, &store, "missing@example.com")
        .await;

    let response = client
        .execute(
            Method::GET,
            &format!("/tasks/{}", Uuid::new_v4()),
            None,
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "task not found");
}

#[tokio::test]
async fn partial_update_keeps_unset_fields() {
    let app = TestApp::spawn().await;
    let (client, store) = app.client();
    app.signed_in_user(&client, &store, "patch@example.com")
        .await;

    let tasks = TaskClient::new(client.clone());
    let created = tasks.create("Keep my name", TaskStatus::Todo).await.unwrap();

    let update = UpdateTask {
        task_name: None,
        status: Some(TaskStatus::Done),
    };
    let updated = tasks.update(created.id, &update).await.unwrap();

    assert_eq!(updated.task_name, "Keep my name");
    assert!(matches!(updated.status, TaskStatus::Done));
}

#[tokio::test]
async fn update_missing_task_is_not_found() {
    let app = TestApp::spawn().await;
    let (client, store) = app.client();
    app.signed_in_user(&client, &store, "patch404@example.com")
        .await;

    let tasks = TaskClient::new(client.clone());
    let update = UpdateTask {
        task_name: Some("New name".to_string()),
        status: None,
    };
    let err = tasks.update(Uuid::new_v4(), &update).await.unwrap_err();
    assert_eq!(err.to_string(), "task not found");
}

#[tokio::test]
async fn delete_removes_the_task() {
    let app = TestApp::spawn().await;
    let (client, store) = app.client();
    app.signed_in_user(&client, &store, "delete@example.com")
        .await;

    let tasks = TaskClient::new(client.clone());
    let created = tasks.create("Doomed", TaskStatus::Todo).await.unwrap();

    let response = client
        .execute(Method::DELETE, &format!("/tasks/{}", created.id), None)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "task deleted");

    let err = tasks.get(created.id).await.unwrap_err();
    assert_eq!(err.to_string(), "task not found");
}

#[tokio::test]
async fn task_routes_require_authentication() {
    let app = TestApp::spawn().await;
    let (client, _store) = app.client();

    for (method, path) in [
        (Method::GET, "/tasks".to_string()),
        (Method::POST, "/tasks".to_string()),
        (Method::GET, format!("/tasks/{}", Uuid::new_v4())),
        (Method::PATCH, format!("/tasks/{}", Uuid::new_v4())),
        (Method::DELETE, format!("/tasks/{}", Uuid::new_v4())),
    ] {
        let body = json!({ "task_name": "x", "status": 0 });
        let response = client.execute(method, &path, Some(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{path}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Token not found");
    }
}
