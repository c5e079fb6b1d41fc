//! Error types for formforge operations.
//!
//! Defines error types for the major subsystems:
//! - Form definition validation
//! - LLM-backed definition generation
//! - Forms backend HTTP interactions
//! - Remote form orchestration
//!
//! The two compilers have no error type of their own: they are total over any
//! validated `FormDefinition` and return plain values.

use thiserror::Error;

/// A structural problem in a [`FormDefinition`](crate::model::FormDefinition).
///
/// Validation errors are locally recoverable: the caller re-edits the input
/// and tries again. Neither compiler runs on a definition that fails here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid form definition: {field}: {reason}")]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `sections[2].questions`.
    pub field: String,
    /// Human-readable description of the violation.
    pub reason: String,
}

impl ValidationError {
    /// Creates a validation error for the given field.
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors from the LLM text-generation collaborator.
///
/// Each variant carries a distinct remediation for the user: a safety block
/// asks for different input, an invalid key points at settings, an empty
/// response suggests a retry.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The request was rejected by the provider's safety filters.
    #[error("the request was blocked by safety settings; modify the input and try again")]
    SafetyBlocked,

    /// The configured API key was rejected by the provider.
    #[error("the configured API key is not valid; check it in the settings")]
    InvalidKey,

    /// The provider returned a response with no usable text.
    #[error("the model returned an empty response")]
    Empty,

    /// Any other generation failure, with the underlying detail.
    #[error("generation failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Other(err.to_string())
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::Other(format!("malformed structured response: {err}"))
    }
}

/// Errors from the remote forms backend transport.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The HTTP request itself failed (connection, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with an error status and message.
    #[error("backend error ({code}): {message}")]
    Api { code: u16, message: String },

    /// The backend answered 2xx but the body was not the expected shape.
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),
}

/// Errors that can occur while creating a remote form.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// No authenticated session is available.
    #[error("not signed in: an authenticated session is required to create a form")]
    Unauthenticated,

    /// The create-shell call failed or returned no form identifier.
    #[error("form creation failed: {0}")]
    CreationFailed(String),

    /// The batch mutation call failed; the backend message is carried verbatim.
    #[error("could not populate form: {message}")]
    BatchMutationFailed { message: String },
}
