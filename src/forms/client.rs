//! Reqwest implementation of [`FormsBackend`] against the Forms REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{FormShell, FormsBackend};
use crate::compile::MutationOp;
use crate::error::BackendError;

/// Default base URL of the Google Forms v1 API.
const DEFAULT_API_BASE: &str = "https://forms.googleapis.com/v1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// HTTP client for the Google Forms backend.
pub struct GoogleFormsClient {
    client: Client,
    api_base: String,
}

impl GoogleFormsClient {
    /// Creates a client against the production endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    /// Creates a client against a custom API base (used by tests).
    pub fn with_base_url(api_base: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_base: api_base.into(),
        }
    }

    async fn error_from(response: reqwest::Response) -> BackendError {
        let code = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .map(|e| e.message)
            .unwrap_or(body);
        BackendError::Api { code, message }
    }
}

impl Default for GoogleFormsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateFormResponse {
    #[serde(default)]
    form_id: String,
    #[serde(default)]
    responder_uri: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

#[async_trait]
impl FormsBackend for GoogleFormsClient {
    async fn create_shell(&self, token: &str, title: &str) -> Result<FormShell, BackendError> {
        let url = format!("{}/forms", self.api_base.trim_end_matches('/'));
        debug!(%title, "creating form shell");
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&json!({
                "info": { "title": title, "documentTitle": title }
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let created: CreateFormResponse = response
            .json()
            .await
            .map_err(|e| BackendError::MalformedResponse(e.to_string()))?;
        if created.form_id.is_empty() {
            return Err(BackendError::MalformedResponse(
                "missing formId in creation response".into(),
            ));
        }
        Ok(FormShell {
            edit_url: format!("https://docs.google.com/forms/d/{}/edit", created.form_id),
            share_url: created.responder_uri,
            form_id: created.form_id,
        })
    }

    async fn batch_mutate(
        &self,
        token: &str,
        form_id: &str,
        ops: &[MutationOp],
    ) -> Result<(), BackendError> {
        let url = format!(
            "{}/forms/{form_id}:batchUpdate",
            self.api_base.trim_end_matches('/')
        );
        debug!(%form_id, ops = ops.len(), "sending batch update");
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&json!({ "requests": ops }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }
}
