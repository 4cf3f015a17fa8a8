use std::sync::Arc;

use diagora::backend::{BackendError, HttpBackend, QuestionBackend};
use diagora::core::controller::Controller;
use diagora::core::conversation::{Conversation, Entry, Role, TRANSPORT_FAILURE_TEXT};
use diagora::core::health::check_health;
use diagora::core::surface::{IndicatorState, InputControl, StatusIndicator};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Input field stand-in that records what the controller did to it.
#[derive(Debug, Default)]
struct InputRecorder {
    enabled: Option<bool>,
    enable_calls: Vec<bool>,
    cleared: usize,
    focused: usize,
}

impl InputControl for InputRecorder {
    fn clear(&mut self) {
        self.cleared += 1;
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = Some(enabled);
        self.enable_calls.push(enabled);
    }

    fn focus(&mut self) {
        self.focused += 1;
    }
}

#[derive(Debug, Default)]
struct Light(IndicatorState);

impl StatusIndicator for Light {
    fn set_state(&mut self, state: IndicatorState) {
        self.0 = state;
    }
}

fn controller(server_uri: &str) -> Controller<Conversation, InputRecorder> {
    let backend: Arc<dyn QuestionBackend> = Arc::new(HttpBackend::new(server_uri));
    Controller::new(backend, Conversation::new(), InputRecorder::default())
}

async fn mount_ask(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/api/ask"))
        .respond_with(response)
        .mount(server)
        .await;
}

/// The last message in the log (the backend's reply after a request).
fn reply(ctl: &Controller<Conversation, InputRecorder>) -> diagora::core::conversation::Message {
    ctl.log()
        .messages()
        .last()
        .cloned()
        .expect("conversation has a reply")
}

// ============================================================================
// Ask Endpoint
// ============================================================================

#[tokio::test]
async fn test_question_posted_as_json_and_answer_rendered_with_metadata() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/ask"))
        .and(body_json(json!({"question": "kaç adet concurrent request var"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "Su anda **12** concurrent request calisiyor.",
            "intent": "concurrent_requests",
            "query_executed": true,
            "row_count": 12
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctl = controller(&server.uri());
    assert!(ctl.submit("  kaç adet concurrent request var  ").await);

    let entries = ctl.log().entries();
    assert_eq!(entries.len(), 2, "welcome gone, user + assistant remain");
    let Entry::Message(question) = &entries[0] else {
        panic!("expected user message, got {:?}", entries[0]);
    };
    assert_eq!(question.role, Role::User);
    assert_eq!(question.content, "kaç adet concurrent request var");

    let answer = reply(&ctl);
    assert_eq!(answer.role, Role::Assistant);
    assert!(!answer.is_error);
    assert!(answer.content.contains("**12**"));
    let meta = answer.meta_line().expect("metadata line");
    assert_eq!(meta.intent_badge.as_deref(), Some("Requests"));
    assert_eq!(meta.row_annotation().as_deref(), Some("12 kayit"));

    let input = ctl.input();
    assert_eq!(input.cleared, 1);
    assert_eq!(input.enable_calls, vec![false, true]);
    assert_eq!(input.focused, 1);
}

#[tokio::test]
async fn test_application_error_shown_as_error_message() {
    let server = MockServer::start().await;
    mount_ask(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"error": "unparsed"})),
    )
    .await;

    let mut ctl = controller(&server.uri());
    ctl.ask_question("???").await;

    let answer = reply(&ctl);
    assert!(answer.is_error);
    assert_eq!(answer.content, "unparsed");
    assert_eq!(answer.meta_line(), None);
    assert_eq!(ctl.log().typing_count(), 0);
    assert_eq!(ctl.input().enabled, Some(true));
}

#[tokio::test]
async fn test_json_body_on_server_error_is_honored() {
    let server = MockServer::start().await;
    mount_ask(
        &server,
        ResponseTemplate::new(500).set_body_json(json!({
            "answer": "Veritabanina ulasilamiyor.",
            "error": "ORA-12541"
        })),
    )
    .await;

    let mut ctl = controller(&server.uri());
    ctl.ask_question("aktif alertler").await;

    let answer = reply(&ctl);
    assert!(answer.is_error);
    assert_eq!(answer.content, "Veritabanina ulasilamiyor.");
}

#[tokio::test]
async fn test_non_json_error_body_is_api_error() {
    let server = MockServer::start().await;
    mount_ask(
        &server,
        ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"),
    )
    .await;

    let backend = HttpBackend::new(server.uri());
    match backend.ask("soru").await {
        Err(BackendError::Api { status, message }) => {
            assert_eq!(status, 502);
            assert!(message.contains("Bad Gateway"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }

    // The user only sees the fixed failure text
    let mut ctl = controller(&server.uri());
    ctl.ask_question("soru").await;
    let answer = reply(&ctl);
    assert!(answer.is_error);
    assert_eq!(answer.content, TRANSPORT_FAILURE_TEXT);
}

#[tokio::test]
async fn test_unreadable_success_body_is_parse_error() {
    let server = MockServer::start().await;
    mount_ask(&server, ResponseTemplate::new(200).set_body_string("not json")).await;

    let backend = HttpBackend::new(server.uri());
    assert!(matches!(
        backend.ask("soru").await,
        Err(BackendError::Parse(_))
    ));
}

#[tokio::test]
async fn test_unreachable_backend_shows_transport_failure() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let mut ctl = controller(&uri);
    ctl.ask_question("durum nedir").await;

    let answer = reply(&ctl);
    assert!(answer.is_error);
    assert_eq!(answer.content, TRANSPORT_FAILURE_TEXT);
    assert_eq!(ctl.log().typing_count(), 0);
    assert_eq!(ctl.input().enable_calls, vec![false, true]);
    assert_eq!(ctl.input().focused, 1);
}

#[tokio::test]
async fn test_blank_question_never_reaches_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "x"})))
        .expect(0)
        .mount(&server)
        .await;

    let mut ctl = controller(&server.uri());
    assert!(!ctl.submit("   ").await);
    assert!(ctl.log().has_welcome());
    assert_eq!(ctl.input().cleared, 0);
}

// ============================================================================
// Health Endpoint
// ============================================================================

async fn mount_health(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_health_sets_indicators() {
    let server = MockServer::start().await;
    mount_health(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "database": "connected",
            "llm": "not_configured"
        })),
    )
    .await;

    let backend = HttpBackend::new(server.uri());
    let (mut storage, mut model) = (Light::default(), Light::default());
    let status = check_health(&backend, &mut storage, &mut model).await;

    assert!(status.is_some());
    assert_eq!(storage.0, IndicatorState::Connected);
    assert_eq!(model.0, IndicatorState::Warning);
}

#[tokio::test]
async fn test_health_failure_leaves_indicators_unset() {
    let server = MockServer::start().await;
    mount_health(&server, ResponseTemplate::new(503).set_body_string("down")).await;

    let backend = HttpBackend::new(server.uri());
    let (mut storage, mut model) = (Light::default(), Light::default());
    let status = check_health(&backend, &mut storage, &mut model).await;

    assert!(status.is_none());
    assert_eq!(storage.0, IndicatorState::Unset);
    assert_eq!(model.0, IndicatorState::Unset);
}

#[tokio::test]
async fn test_health_body_that_is_not_an_object_warns_both() {
    let server = MockServer::start().await;
    mount_health(&server, ResponseTemplate::new(200).set_body_json(json!([]))).await;

    let backend = HttpBackend::new(server.uri());
    let (mut storage, mut model) = (Light::default(), Light::default());
    let status = check_health(&backend, &mut storage, &mut model).await;

    assert!(status.is_some());
    assert_eq!(storage.0, IndicatorState::Warning);
    assert_eq!(model.0, IndicatorState::Warning);
}
