//! LLM collaborator interface for structured generation.
//!
//! The rest of the crate never talks to a provider directly: everything goes
//! through [`TextGenerator`], a single fallible call that takes a prompt, a
//! system instruction, and a JSON response schema, and returns the parsed
//! structured result. Retry decisions belong to the caller; the collaborator
//! itself makes exactly one attempt.

pub mod gemini;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::GenerationError;

pub use gemini::GeminiClient;

/// An opaque structured-output text generator.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates one structured result constrained by `schema`.
    async fn generate(
        &self,
        prompt: &str,
        system: &str,
        schema: &Value,
    ) -> Result<Value, GenerationError>;
}
