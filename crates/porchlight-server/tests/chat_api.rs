//! Chat endpoint integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use porchlight_core::{FrontDesk, Inventory, LogNotifier};
use porchlight_server::config::ServerConfig;
use porchlight_server::{AppState, prepare_inventory, router};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_app() -> Router {
    let inventory = Inventory::open_in_memory().expect("open inventory");
    let property = inventory
        .add_property("12 Oak Ln", 2, true)
        .expect("add property");
    inventory
        .add_slot(property, "2033-09-01 10:00", "2033-09-01 11:00")
        .expect("add slot");
    let desk = Arc::new(FrontDesk::new(inventory, Arc::new(LogNotifier)));
    router(AppState { desk })
}

async fn post_chat(app: Router, session_id: &str, message: &str) -> (StatusCode, Value) {
    let body = json!({ "session_id": session_id, "message": message }).to_string();
    let request = Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = serde_json::from_slice(&bytes).expect("parse JSON");
    (status, value)
}

#[tokio::test]
async fn chat_returns_a_reply_body() {
    let app = test_app();
    let (status, body) = post_chat(app, "k3j9x0q2m8b1fz", "hi").await;

    assert_eq!(status, StatusCode::OK);
    let reply = body["reply"].as_str().expect("reply string");
    assert!(reply.contains("leasing assistant"), "{reply}");
}

#[tokio::test]
async fn chat_keeps_per_session_conversation_state() {
    let app = test_app();

    let (_, _) = post_chat(app.clone(), "session-one", "hi").await;
    let (status, body) = post_chat(app.clone(), "session-one", "Ana").await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        body["reply"]
            .as_str()
            .expect("reply string")
            .contains("Nice to meet you, Ana"),
        "{body}"
    );

    // A different session starts over at the greeting.
    let (_, body) = post_chat(app, "session-two", "Ana").await;
    assert!(
        body["reply"]
            .as_str()
            .expect("reply string")
            .contains("What's your name?"),
        "{body}"
    );
}

#[tokio::test]
async fn malformed_bodies_are_client_errors() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("not json"))
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    assert!(response.status().is_client_error(), "{}", response.status());

    let request = Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"session_id": "abc"}"#))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert!(response.status().is_client_error(), "{}", response.status());
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body: Value = serde_json::from_slice(&bytes).expect("parse JSON");
    assert_eq!(body, json!({ "status": "ok" }));
}

#[test]
fn fresh_databases_are_seeded_once() {
    let temp = tempfile::tempdir().expect("tempdir");
    let seed_path = temp.path().join("seed.sql");
    std::fs::write(
        &seed_path,
        "INSERT INTO properties (address, beds, available) VALUES ('701 Pine Ave', 1, 1);
         INSERT INTO availability (property_id, start_time, end_time)
         VALUES (1, '2033-09-01 10:00', '2033-09-01 11:00');",
    )
    .expect("write seed");
    let config = ServerConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        db_path: temp.path().join("inventory.db"),
        seed_path: seed_path.clone(),
    };

    let inventory = prepare_inventory(&config).expect("prepare");
    assert_eq!(inventory.available_properties(1).expect("query").len(), 1);
    drop(inventory);

    // Reopening an existing database must not reapply the seed.
    let inventory = prepare_inventory(&config).expect("prepare again");
    assert_eq!(inventory.available_properties(1).expect("query").len(), 1);
}

#[test]
fn missing_seed_file_leaves_inventory_empty() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = ServerConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        db_path: temp.path().join("inventory.db"),
        seed_path: temp.path().join("absent.sql"),
    };

    let inventory = prepare_inventory(&config).expect("prepare");
    assert_eq!(inventory.available_properties(1).expect("query").len(), 0);
}
