//! Form-relay client for the contact form.
//!
//! # Architecture
//!
//! - [`FormRelay`] - the seam the submission controller talks to. One call, one
//!   HTTP request, no retries.
//! - [`FormspreeRelay`] - Formspree-compatible implementation posting JSON to
//!   `{base_url}/f/{form_id}`.
//! - [`UnconfiguredRelay`] - stand-in used when no form id is configured, so the
//!   UI still runs and reports a submission error instead of panicking.
//!
//! # Error Handling
//!
//! Every failure is a [`RelayError`]. Only HTTP 200 counts as delivered; any
//! other status is returned as [`RelayError::Status`] with a capped copy of the
//! response body for logging.

mod formspree;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

use folio_types::ContactPayload;

pub use formspree::FormspreeRelay;

const CONNECT_TIMEOUT_SECS: u64 = 10;

const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

/// Relay submission future type alias.
pub type RelayFut<'a> = Pin<Box<dyn Future<Output = Result<(), RelayError>> + Send + 'a>>;

/// Delivers a contact payload to a third-party relay.
pub trait FormRelay: Send + Sync {
    fn submit<'a>(&'a self, payload: &'a ContactPayload) -> RelayFut<'a>;

    /// Short identifier for logs.
    fn name(&self) -> &'static str;
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("no relay form id is configured")]
    MissingFormId,
    #[error("invalid relay endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("relay endpoint must be http or https, got {0:?}")]
    UnsupportedScheme(String),
    #[error("relay request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("relay returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl RelayError {
    /// HTTP status for rejected submissions.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            RelayError::Status { status, .. } => Some(*status),
            RelayError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Relay used when nothing is configured. Every submission fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredRelay;

impl FormRelay for UnconfiguredRelay {
    fn submit<'a>(&'a self, _payload: &'a ContactPayload) -> RelayFut<'a> {
        Box::pin(async { Err(RelayError::MissingFormId) })
    }

    fn name(&self) -> &'static str {
        "unconfigured"
    }
}

fn base_client_builder() -> reqwest::ClientBuilder {
    use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

    let mut default_headers = HeaderMap::new();
    default_headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("folio/", env!("CARGO_PKG_VERSION"))),
    );

    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .redirect(reqwest::redirect::Policy::none())
        .default_headers(default_headers)
}

pub fn http_client_with_timeout(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    base_client_builder().timeout(timeout).build()
}

pub async fn read_capped_error_body(response: reqwest::Response) -> String {
    use futures_util::StreamExt;
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let Ok(chunk) = chunk else { break };
        body.extend_from_slice(&chunk);
        if body.len() > MAX_ERROR_BODY_BYTES {
            body.truncate(MAX_ERROR_BODY_BYTES);
            let text = String::from_utf8_lossy(&body);
            return format!("{text}...(truncated)");
        }
    }
    String::from_utf8_lossy(&body).into_owned()
}
