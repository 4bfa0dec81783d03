//! Lifecycle controller tests: real listener, real HTTP client.

mod common;

use std::net::TcpListener;

use serde_json::json;

use blog_server::{AppState, LifecycleError, Phase, ServerConfig, ServerController};
use blog_shared::dto::PostResponse;

use common::{SEED_COUNT, seed_blog_data};

const TEST_DATABASE_URL: &str = "memory://test";

#[actix_web::test]
async fn test_run_serve_and_close() {
    let mut controller = ServerController::new(ServerConfig::ephemeral());
    assert_eq!(controller.phase(), Phase::Stopped);

    let addr = controller.run_server(TEST_DATABASE_URL).await.unwrap();
    assert_eq!(controller.phase(), Phase::Running);
    assert_eq!(controller.local_addr(), Some(addr));

    let state = controller.state().unwrap().clone();
    seed_blog_data(&state).await;

    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    let res = client.get(format!("{base}/posts")).send().await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let posts: Vec<PostResponse> = res.json().await.unwrap();
    assert_eq!(posts.len(), SEED_COUNT);

    let res = client
        .post(format!("{base}/posts"))
        .json(&json!({
            "author": { "firstName": "Linus", "lastName": "Torvalds" },
            "title": "Just a hobby",
            "content": "won't be big and professional",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let created: PostResponse = res.json().await.unwrap();
    assert_eq!(created.author, "Linus Torvalds");
    assert_eq!(state.posts.count().await.unwrap(), SEED_COUNT as u64 + 1);

    drop(client);
    controller.close_server().await;
    assert_eq!(controller.phase(), Phase::Stopped);
    assert!(controller.local_addr().is_none());
    assert!(controller.state().is_none());

    // Listener is gone and the store is closed
    let after = reqwest::Client::new()
        .get(format!("{base}/posts"))
        .send()
        .await;
    assert!(after.is_err());
    assert!(state.posts.count().await.is_err());
}

#[actix_web::test]
async fn test_run_twice_is_rejected() {
    let mut controller = ServerController::new(ServerConfig::ephemeral());
    controller.run_server(TEST_DATABASE_URL).await.unwrap();

    let err = controller.run_server(TEST_DATABASE_URL).await.unwrap_err();
    assert!(matches!(err, LifecycleError::AlreadyRunning(Phase::Running)));
    assert_eq!(controller.phase(), Phase::Running);

    controller.close_server().await;
}

#[actix_web::test]
async fn test_close_when_stopped_is_noop() {
    let mut controller = ServerController::new(ServerConfig::ephemeral());
    controller.close_server().await;
    assert_eq!(controller.phase(), Phase::Stopped);
}

#[actix_web::test]
async fn test_restart_after_close() {
    let mut controller = ServerController::new(ServerConfig::ephemeral());

    controller.run_server(TEST_DATABASE_URL).await.unwrap();
    controller.close_server().await;

    let addr = controller.run_server(TEST_DATABASE_URL).await.unwrap();
    let res = reqwest::get(format!("http://{}/health", addr)).await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);

    controller.close_server().await;
}

#[actix_web::test]
async fn test_instances_are_independent() {
    let mut first = ServerController::new(ServerConfig::ephemeral());
    let mut second = ServerController::new(ServerConfig::ephemeral());

    let first_addr = first.run_server(TEST_DATABASE_URL).await.unwrap();
    let second_addr = second.run_server(TEST_DATABASE_URL).await.unwrap();
    assert_ne!(first_addr, second_addr);

    seed_blog_data(first.state().unwrap()).await;

    let posts: Vec<PostResponse> = reqwest::get(format!("http://{}/posts", second_addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(posts.is_empty());

    first.close_server().await;
    second.close_server().await;
}

#[actix_web::test]
async fn test_bind_failure_leaves_controller_stopped() {
    let taken = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = taken.local_addr().unwrap().port();

    let mut controller = ServerController::new(ServerConfig {
        port,
        ..ServerConfig::ephemeral()
    });

    let err = controller.run_server(TEST_DATABASE_URL).await.unwrap_err();
    assert!(matches!(err, LifecycleError::Bind { .. }));
    assert_eq!(controller.phase(), Phase::Stopped);
}

#[actix_web::test]
async fn test_failed_start_closes_the_store() {
    let taken = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = taken.local_addr().unwrap().port();

    let state = AppState::in_memory();
    let mut controller = ServerController::new(ServerConfig {
        port,
        ..ServerConfig::ephemeral()
    });

    let err = controller.run_with_state(state.clone()).await.unwrap_err();
    assert!(matches!(err, LifecycleError::Bind { .. }));
    assert_eq!(controller.phase(), Phase::Stopped);
    assert!(state.posts.count().await.is_err());
}

#[actix_web::test]
async fn test_run_with_state_serves_that_store() {
    let state = AppState::in_memory();
    seed_blog_data(&state).await;

    let mut controller = ServerController::new(ServerConfig::ephemeral());
    let addr = controller.run_with_state(state.clone()).await.unwrap();

    let posts: Vec<PostResponse> = reqwest::get(format!("http://{}/posts", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(posts.len(), SEED_COUNT);

    controller.close_server().await;
    assert!(state.posts.count().await.is_err());
}
