use std::sync::Arc;

use chatbot::core::controller::ConversationController;
use chatbot::core::message::Originator;
use chatbot::core::state::{ConnectionStatus, Diagnostic};
use chatbot::transport::HttpTransport;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn controller_for(uri: &str) -> ConversationController {
    ConversationController::new(Arc::new(HttpTransport::new(uri)))
}

async fn mount_health(server: &MockServer, ai_configured: bool) {
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "ok", "ai_configured": ai_configured})),
        )
        .mount(server)
        .await;
}

// ============================================================================
// Exchanges
// ============================================================================

#[tokio::test]
async fn test_hi_hello_exchange() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({"message": "Hi"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"response": "Hello", "configured": true})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut controller = controller_for(&mock_server.uri());
    assert!(controller.state().welcome_visible());

    assert!(controller.submit("Hi").await);

    let messages = &controller.state().messages;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "Hi");
    assert_eq!(messages[0].originator, Originator::User);
    assert_eq!(messages[1].content, "Hello");
    assert_eq!(messages[1].originator, Originator::Assistant);
    assert!(!messages[1].is_error);

    assert!(!controller.state().welcome_visible());
    assert!(!controller.state().composing);
    assert!(!controller.state().in_flight);
    assert!(controller.state().diagnostics.is_empty());
}

#[tokio::test]
async fn test_submitted_text_is_trimmed_before_sending() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({"message": "spaced out"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "ok"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut controller = controller_for(&mock_server.uri());
    controller.submit("  spaced out \n").await;

    assert_eq!(controller.state().messages[0].content, "spaced out");
}

#[tokio::test]
async fn test_reply_without_configured_flag_is_shown_and_diagnosed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "placeholder"})))
        .mount(&mock_server)
        .await;

    let mut controller = controller_for(&mock_server.uri());
    controller.submit("Hi").await;

    let messages = &controller.state().messages;
    assert_eq!(messages[1].content, "placeholder");
    assert!(!messages[1].is_error);
    assert_eq!(controller.state().diagnostics, vec![Diagnostic::NotConfigured]);
}

#[tokio::test]
async fn test_blank_submit_issues_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "unused"})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut controller = controller_for(&mock_server.uri());
    assert!(!controller.submit("").await);
    assert!(!controller.submit("   ").await);

    assert!(controller.state().messages.is_empty());
    assert!(controller.state().welcome_visible());
}

#[tokio::test]
async fn test_rate_limited_becomes_error_turn() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"error": "rate limited"})))
        .mount(&mock_server)
        .await;

    let mut controller = controller_for(&mock_server.uri());
    controller.submit("Hi").await;

    let messages = &controller.state().messages;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].content, "Error: rate limited");
    assert_eq!(messages[1].originator, Originator::Assistant);
    assert!(messages[1].is_error);
    assert!(!controller.state().in_flight);
}

#[tokio::test]
async fn test_failure_without_error_field_has_generic_description() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let mut controller = controller_for(&mock_server.uri());
    controller.submit("Hi").await;

    let error_turn = &controller.state().messages[1];
    assert!(error_turn.is_error);
    assert!(error_turn.content.len() > "Error: ".len());
    assert_eq!(error_turn.content, "Error: Failed to send message");
}

#[tokio::test]
async fn test_unreachable_service_keeps_client_usable() {
    let mut controller = controller_for("http://127.0.0.1:1");

    controller.probe_connection().await;
    assert!(matches!(
        controller.state().diagnostics.as_slice(),
        [Diagnostic::ConnectionFailed(_)]
    ));
    assert!(controller.state().messages.is_empty());

    controller.set_input("anyone there?");
    assert!(controller.send_enabled());
    assert!(controller.submit("anyone there?").await);

    let messages = &controller.state().messages;
    assert_eq!(messages.len(), 2);
    assert!(messages[1].is_error);
    assert!(messages[1].content.starts_with("Error: "));
}

// ============================================================================
// Health probe
// ============================================================================

#[tokio::test]
async fn test_probe_configured_emits_nothing() {
    let mock_server = MockServer::start().await;
    mount_health(&mock_server, true).await;

    let mut controller = controller_for(&mock_server.uri());
    controller.probe_connection().await;

    assert!(controller.state().diagnostics.is_empty());
    assert_eq!(controller.state().connection, ConnectionStatus::Ready);
    assert!(controller.state().messages.is_empty());
}

#[tokio::test]
async fn test_probe_unconfigured_emits_diagnostic() {
    let mock_server = MockServer::start().await;
    mount_health(&mock_server, false).await;

    let mut controller = controller_for(&mock_server.uri());
    controller.probe_connection().await;

    assert_eq!(controller.state().diagnostics, vec![Diagnostic::NotConfigured]);
    assert_eq!(controller.state().connection, ConnectionStatus::NotConfigured);
    assert!(controller.state().messages.is_empty());
    assert!(controller.state().welcome_visible());
}
