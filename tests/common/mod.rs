//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use folio_engine::{App, AppInit, FormRelay, FormspreeRelay, Portfolio, UiOptions};

pub const FORM_ID: &str = "xtestform";

/// Start a mock server that stands in for the form relay
pub async fn start_relay_mock() -> MockServer {
    MockServer::start().await
}

/// Mount a relay response for the test form
pub async fn mount_relay_response(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(format!("/f/{FORM_ID}")))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Relay pointed at the mock server
pub fn relay_for(server: &MockServer) -> Arc<dyn FormRelay> {
    let relay = FormspreeRelay::new(&server.uri(), FORM_ID, Duration::from_secs(5))
        .expect("mock relay endpoint is valid");
    Arc::new(relay)
}

/// App over the bundled portfolio with motion disabled
pub fn app_with_relay(relay: Arc<dyn FormRelay>) -> App {
    let mut app = App::new(AppInit {
        portfolio: Portfolio::bundled().expect("bundled portfolio parses"),
        options: UiOptions {
            reduced_motion: true,
            ..UiOptions::default()
        },
        relay,
        subject_template: "New portfolio message from {name}".to_string(),
        fallback_email: Some("owner@example.com".to_string()),
        config_path: None,
        year: 2026,
    });
    app.set_viewport(72, 30);
    app
}

/// Fill every field with valid values through the focus model
pub fn fill_valid_form(app: &mut App) {
    app.focus_form();
    app.type_text("  Ada Lovelace ");
    app.focus_next();
    app.type_text("ada@example.com");
    app.focus_next();
    app.type_text("I would like to talk about a project.");
}
