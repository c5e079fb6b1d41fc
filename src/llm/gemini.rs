//! Gemini client for schema-constrained JSON generation.
//!
//! Calls the `models/{model}:generateContent` REST endpoint with a response
//! schema and `application/json` response MIME type, so the reply text is a
//! single JSON document matching the schema. Failures are classified into
//! the [`GenerationError`] subtypes so the caller can show the right
//! remediation (safety block vs. bad key vs. empty reply).

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::TextGenerator;
use crate::error::GenerationError;

/// Default endpoint for the Gemini REST API.
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model for form-definition generation.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// A reqwest-backed Gemini client.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl GeminiClient {
    /// Creates a client with the default endpoint, model, and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_API_BASE)
    }

    /// Creates a client against a custom API base (used by tests).
    pub fn with_base_url(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key: api_key.into(),
            api_base: api_base.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Creates a client from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, GenerationError> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| GenerationError::Other("GEMINI_API_KEY is not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Overrides the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
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

/// Classifies a non-success HTTP response body.
fn classify_api_error(status: u16, body: &str) -> GenerationError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .map(|e| e.message)
        .unwrap_or_else(|| body.to_string());
    if message.contains("API key not valid") || status == 401 || status == 403 {
        GenerationError::InvalidKey
    } else {
        GenerationError::Other(format!("API error ({status}): {message}"))
    }
}

/// Extracts the reply text, mapping blocks and empties to their subtypes.
fn extract_text(response: GenerateContentResponse) -> Result<String, GenerationError> {
    if let Some(feedback) = &response.prompt_feedback {
        if feedback.block_reason.is_some() {
            return Err(GenerationError::SafetyBlocked);
        }
    }
    let candidate = response.candidates.into_iter().next();
    if let Some(candidate) = candidate {
        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(GenerationError::SafetyBlocked);
        }
        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(GenerationError::Empty);
        }
        return Ok(text);
    }
    Err(GenerationError::Empty)
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        system: &str,
        schema: &Value,
    ) -> Result<Value, GenerationError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        );
        let body = json!({
            "systemInstruction": { "parts": [{ "text": system }] },
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
            },
        });

        debug!(model = %self.model, "sending generateContent request");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_api_error(status.as_u16(), &body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Other(format!("unreadable response: {e}")))?;
        let text = extract_text(parsed)?;
        Ok(serde_json::from_str(text.trim())?)
    }
}
