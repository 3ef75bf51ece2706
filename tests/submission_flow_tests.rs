//! End-to-end exchange: submit → dispatch over HTTP → settle, without a terminal.

use std::sync::Arc;

use mcp_chat::backend::{CHAT_ROUTE, HttpChatBackend, dispatch};
use mcp_chat::core::action::{Action, Effect, update};
use mcp_chat::core::config::ResolvedConfig;
use mcp_chat::core::message::{Category, SENDER_ASSISTANT, SENDER_SYSTEM, SENDER_USER};
use mcp_chat::core::state::App;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn app_for(server: &MockServer, target: &str) -> App {
    let config = ResolvedConfig {
        endpoint: server.uri(),
        server_id: target.to_string(),
        ..ResolvedConfig::default()
    };
    App::from_config(Arc::new(HttpChatBackend::new(server.uri())), &config)
}

/// Submit `input` and settle the resulting request against the live backend.
async fn exchange(app: &mut App, input: &str) {
    let Effect::SpawnRequest(request) = update(app, Action::Submit(input.into())) else {
        panic!("submit of {input:?} did not spawn a request");
    };
    assert!(app.is_pending());

    let outcome = dispatch(app.backend.as_ref(), &request).await;
    update(app, Action::ResponseReceived(outcome));
}

#[tokio::test]
async fn test_successful_exchange_appends_user_then_reply() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_ROUTE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reply": "There are *many* players.",
            "server_data_used": {"players": 42}
        })))
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server, "Hypixel");
    let welcome_count = app.messages.len();

    exchange(&mut app, "  how busy is it?  ").await;

    assert!(!app.is_pending());
    let new: Vec<_> = app.messages[welcome_count..].iter().collect();
    assert_eq!(new.len(), 2, "pending indicator must be replaced, not kept");

    assert_eq!(new[0].sender, SENDER_USER);
    assert_eq!(new[0].text, "how busy is it?");
    assert_eq!(new[0].category, Category::User);

    assert_eq!(new[1].sender, SENDER_ASSISTANT);
    assert_eq!(new[1].text, "There are *many* players.");
    assert_eq!(new[1].category, Category::Llm);

    assert!(app.messages.iter().all(|m| !m.text.contains("42")));
}

#[tokio::test]
async fn test_failed_exchange_shows_system_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_ROUTE))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server, "");
    exchange(&mut app, "hello").await;

    assert!(!app.is_pending());
    assert!(app.messages.iter().all(|m| m.category != Category::Info));
    let last = app.messages.last().unwrap();
    assert_eq!(last.sender, SENDER_SYSTEM);
    assert_eq!(last.category, Category::Error);
    assert_eq!(
        last.text,
        "Error: Failed to get response from server (HTTP 503)"
    );
}

#[tokio::test]
async fn test_second_submit_ignored_until_settled() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_ROUTE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "first"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server, "");
    let Effect::SpawnRequest(request) = update(&mut app, Action::Submit("one".into())) else {
        panic!("first submit must spawn");
    };
    let before = app.messages.len();

    assert_eq!(update(&mut app, Action::Submit("two".into())), Effect::None);
    assert_eq!(app.messages.len(), before);

    let outcome = dispatch(app.backend.as_ref(), &request).await;
    update(&mut app, Action::ResponseReceived(outcome));
    assert_eq!(app.messages.last().unwrap().text, "first");
}
