//! Contact form submissions against a mock relay

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use folio_engine::{
    FormField, FormspreeRelay, RESET_DELAY, SUCCESS_MESSAGE, SubmissionStatus, SubmitOutcome,
};

use crate::common::{
    FORM_ID, app_with_relay, fill_valid_form, mount_relay_response, relay_for, start_relay_mock,
};

#[tokio::test]
async fn successful_submission_posts_payload_and_resets() {
    let server = start_relay_mock().await;
    mount_relay_response(&server, 200, json!({"ok": true})).await;
    let mut app = app_with_relay(relay_for(&server));

    fill_valid_form(&mut app);
    assert_eq!(app.submit(), SubmitOutcome::Sent);
    assert!(app.form().status().is_loading());

    assert!(app.next_form_event().await);
    assert!(matches!(app.form().status(), SubmissionStatus::Success(_)));
    assert_eq!(app.form().status().message(), Some(SUCCESS_MESSAGE));
    assert!(app.form().input().is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body,
        json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "message": "I would like to talk about a project.",
            "_subject": "New portfolio message from Ada Lovelace",
            "_replyto": "ada@example.com",
        })
    );

    // Only the reset timer is left; let the paused clock run to it.
    tokio::time::pause();
    let start = tokio::time::Instant::now();
    assert!(app.next_form_event().await);
    assert!(start.elapsed() >= RESET_DELAY - Duration::from_secs(1));
    assert_eq!(app.form().status(), &SubmissionStatus::Idle);
}

#[tokio::test]
async fn rejected_submission_keeps_draft_and_offers_email() {
    let server = start_relay_mock().await;
    mount_relay_response(
        &server,
        422,
        json!({"errors": [{"field": "email", "message": "should be an email"}]}),
    )
    .await;
    let mut app = app_with_relay(relay_for(&server));

    fill_valid_form(&mut app);
    assert_eq!(app.submit(), SubmitOutcome::Sent);
    assert!(app.next_form_event().await);

    let SubmissionStatus::Error(message) = app.form().status() else {
        panic!("expected error status, got {:?}", app.form().status());
    };
    assert!(message.as_str().contains("owner@example.com"));
    assert_eq!(app.form().input().email, "ada@example.com");
    assert!(app.can_submit());

    // No automatic reset or retry follows an error.
    tokio::time::pause();
    let waited = tokio::time::timeout(RESET_DELAY * 2, app.next_form_event()).await;
    assert!(waited.is_err());
    assert!(matches!(app.form().status(), SubmissionStatus::Error(_)));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_form_never_reaches_relay() {
    let server = start_relay_mock().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let mut app = app_with_relay(relay_for(&server));

    app.focus_form();
    app.type_text("Ada");
    app.focus_next();
    app.type_text("not-an-email");
    app.focus_next();
    app.type_text("short");

    assert_eq!(app.submit(), SubmitOutcome::Invalid);
    assert_eq!(
        app.form().errors().get(FormField::Email),
        Some("Please enter a valid email")
    );
    assert_eq!(
        app.form().errors().get(FormField::Message),
        Some("Message must be at least 10 characters")
    );
    assert!(!app.form().errors().contains(FormField::Name));
    assert_eq!(app.form().status(), &SubmissionStatus::Idle);
    server.verify().await;
}

#[tokio::test]
async fn double_submit_sends_one_request() {
    let server = start_relay_mock().await;
    Mock::given(method("POST"))
        .and(path(format!("/f/{FORM_ID}")))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(200)))
        .mount(&server)
        .await;
    let mut app = app_with_relay(relay_for(&server));

    fill_valid_form(&mut app);
    assert_eq!(app.submit(), SubmitOutcome::Sent);
    assert_eq!(app.submit(), SubmitOutcome::AlreadySending);
    assert!(!app.can_submit());

    assert!(app.next_form_event().await);
    assert!(matches!(app.form().status(), SubmissionStatus::Success(_)));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn manual_retry_after_failure_succeeds() {
    let server = start_relay_mock().await;
    Mock::given(method("POST"))
        .and(path(format!("/f/{FORM_ID}")))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_relay_response(&server, 200, json!({"ok": true})).await;
    let mut app = app_with_relay(relay_for(&server));

    fill_valid_form(&mut app);
    app.submit();
    assert!(app.next_form_event().await);
    assert!(matches!(app.form().status(), SubmissionStatus::Error(_)));

    assert_eq!(app.submit(), SubmitOutcome::Sent);
    assert!(app.next_form_event().await);
    assert!(matches!(app.form().status(), SubmissionStatus::Success(_)));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn shutdown_voids_pending_submission() {
    let server = start_relay_mock().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;
    let mut app = app_with_relay(relay_for(&server));

    fill_valid_form(&mut app);
    assert_eq!(app.submit(), SubmitOutcome::Sent);
    app.shutdown();

    tokio::time::sleep(Duration::from_millis(500)).await;
    app.tick(Duration::from_millis(16));
    assert!(app.form().status().is_loading());
    assert_eq!(app.submit(), SubmitOutcome::Closed);
}

#[tokio::test]
async fn unreachable_relay_reports_error_and_keeps_draft() {
    let base = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };
    let relay = FormspreeRelay::new(&base, FORM_ID, Duration::from_secs(5)).unwrap();
    let mut app = app_with_relay(Arc::new(relay));

    fill_valid_form(&mut app);
    assert_eq!(app.submit(), SubmitOutcome::Sent);
    assert!(app.next_form_event().await);

    assert!(matches!(app.form().status(), SubmissionStatus::Error(_)));
    assert_eq!(app.form().input().name, "  Ada Lovelace ");
    assert!(app.can_submit());
}
