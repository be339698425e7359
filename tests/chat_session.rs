//! End-to-end chat session tests against a mock agent endpoint

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use antigravity::api::ApiClient;
use antigravity::chat::{ChatSession, SubmitOutcome, FALLBACK_TEXT, WELCOME_TEXT};
use antigravity::config::ClientConfig;
use antigravity::types::Sender;

fn test_config(server: &MockServer) -> ClientConfig {
    ClientConfig {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(300),
        ..ClientConfig::default()
    }
}

#[tokio::test]
async fn exchange_appends_reply_after_user_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/agent/chat"))
        .and(header("content-type", "text/plain"))
        .and(body_string("What is my exposure?"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Your CVaR exposure is 3.2%."))
        .expect(1)
        .mount(&server)
        .await;

    let session = ChatSession::new(Arc::new(ApiClient::new(&test_config(&server))));
    let outcome = session.submit("What is my exposure?").await;
    assert_eq!(outcome, SubmitOutcome::Replied);

    let transcript = session.transcript().await;
    let entries: Vec<(Sender, &str)> = transcript
        .iter()
        .map(|m| (m.sender, m.text.as_str()))
        .collect();
    assert_eq!(
        entries,
        vec![
            (Sender::Agent, WELCOME_TEXT),
            (Sender::User, "What is my exposure?"),
            (Sender::Agent, "Your CVaR exposure is 3.2%."),
        ]
    );
}

#[tokio::test]
async fn timeout_is_replaced_by_reassurance_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/agent/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("too late")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let session = ChatSession::new(Arc::new(ApiClient::new(&test_config(&server))));
    let outcome = session.submit("anyone there?").await;
    assert_eq!(outcome, SubmitOutcome::FellBack);

    let transcript = session.transcript().await;
    let last = transcript.last().expect("transcript is never empty");
    assert_eq!(last.sender, Sender::Agent);
    assert_eq!(last.text, FALLBACK_TEXT);
}

#[tokio::test]
async fn server_error_is_replaced_by_reassurance_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/agent/chat"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let session = ChatSession::new(Arc::new(ApiClient::new(&test_config(&server))));
    assert_eq!(session.submit("hello").await, SubmitOutcome::FellBack);

    let transcript = session.transcript().await;
    assert_eq!(transcript.last().expect("non-empty").text, FALLBACK_TEXT);
    // The raw status never reaches the transcript.
    assert!(!transcript.iter().any(|m| m.text.contains("503")));
}

#[tokio::test]
async fn input_is_trimmed_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/agent/chat"))
        .and(body_string("status?"))
        .respond_with(ResponseTemplate::new(200).set_body_string("All systems nominal."))
        .expect(1)
        .mount(&server)
        .await;

    let session = ChatSession::new(Arc::new(ApiClient::new(&test_config(&server))));
    assert_eq!(session.submit("  status?  ").await, SubmitOutcome::Replied);
}
