//! Formspree-compatible relay.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use url::Url;

use folio_types::ContactPayload;

use crate::{FormRelay, RelayError, RelayFut, http_client_with_timeout, read_capped_error_body};

#[derive(Debug, Clone)]
pub struct FormspreeRelay {
    client: reqwest::Client,
    endpoint: Url,
}

impl FormspreeRelay {
    pub fn new(base_url: &str, form_id: &str, timeout: Duration) -> Result<Self, RelayError> {
        let client = http_client_with_timeout(timeout)?;
        Self::with_client(client, base_url, form_id)
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        form_id: &str,
    ) -> Result<Self, RelayError> {
        let endpoint = endpoint_url(base_url, form_id)?;
        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn send(&self, payload: &ContactPayload) -> Result<(), RelayError> {
        tracing::debug!(endpoint = %self.endpoint, "Posting contact payload");
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK {
            tracing::info!("Relay accepted submission");
            return Ok(());
        }

        let body = read_capped_error_body(response).await;
        tracing::warn!(
            status = status.as_u16(),
            body_bytes = body.len(),
            "Relay rejected submission"
        );
        Err(RelayError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

impl FormRelay for FormspreeRelay {
    fn submit<'a>(&'a self, payload: &'a ContactPayload) -> RelayFut<'a> {
        Box::pin(self.send(payload))
    }

    fn name(&self) -> &'static str {
        "formspree"
    }
}

fn endpoint_url(base_url: &str, form_id: &str) -> Result<Url, RelayError> {
    let form_id = form_id.trim();
    if form_id.is_empty() {
        return Err(RelayError::MissingFormId);
    }

    let mut url = Url::parse(base_url.trim())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(RelayError::UnsupportedScheme(url.scheme().to_string()));
    }
    url.set_query(None);
    url.set_fragment(None);
    {
        let scheme = url.scheme().to_string();
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| RelayError::UnsupportedScheme(scheme))?;
        segments.pop_if_empty().push("f").push(form_id);
    }
    Ok(url)
}
