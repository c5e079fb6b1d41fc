//! Remote form creation against the Google Forms backend.
//!
//! The orchestrator owns no transport and no credentials: both arrive as
//! injected collaborators ([`AuthSession`], [`FormsBackend`]), so tests run
//! against in-memory fakes and the CLI wires in the real
//! [`GoogleFormsClient`]. One invocation makes exactly one shell-creation
//! call and at most one batch call; retries are the caller's decision.

pub mod client;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::compile::{compile_mutations, MutationOp};
use crate::error::{BackendError, OrchestratorError};
use crate::model::FormDefinition;

pub use client::GoogleFormsClient;

/// An authenticated session, owned by an external OAuth collaborator.
pub trait AuthSession: Send + Sync {
    /// Whether a usable session exists.
    fn is_signed_in(&self) -> bool;
    /// The bearer token for backend calls, if signed in.
    fn token(&self) -> Option<String>;
}

/// A fixed-token session, e.g. a token minted out of band for the CLI.
pub struct StaticToken(String);

impl StaticToken {
    /// Wraps a pre-minted OAuth token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl AuthSession for StaticToken {
    fn is_signed_in(&self) -> bool {
        !self.0.trim().is_empty()
    }

    fn token(&self) -> Option<String> {
        self.is_signed_in().then(|| self.0.clone())
    }
}

/// The empty form returned by the backend's create call.
#[derive(Debug, Clone)]
pub struct FormShell {
    /// Backend identifier for subsequent mutations.
    pub form_id: String,
    /// URL of the editing surface.
    pub edit_url: String,
    /// Human-facing share (respond) URL.
    pub share_url: String,
}

/// The remote forms service, reduced to the two calls the orchestrator needs.
#[async_trait]
pub trait FormsBackend: Send + Sync {
    /// Creates an empty form shell carrying only the title.
    async fn create_shell(&self, token: &str, title: &str) -> Result<FormShell, BackendError>;

    /// Applies one atomic batch of mutations to an existing form.
    async fn batch_mutate(
        &self,
        token: &str,
        form_id: &str,
        ops: &[MutationOp],
    ) -> Result<(), BackendError>;
}

/// A successfully created and populated remote form.
#[derive(Debug, Clone)]
pub struct CreatedForm {
    /// Backend identifier of the form.
    pub form_id: String,
    /// URL of the editing surface.
    pub edit_url: String,
    /// Human-facing share URL, the orchestrator's primary result.
    pub share_url: String,
}

/// Phase of a `create_remote_form` invocation, for diagnostics.
///
/// Errors abort the sequence; the caller decides whether to re-invoke it
/// from the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatePhase {
    Creating,
    Populating,
    Done,
}

/// Creates remote forms by compiling a definition into one mutation batch.
pub struct FormOrchestrator {
    auth: Arc<dyn AuthSession>,
    backend: Arc<dyn FormsBackend>,
}

impl FormOrchestrator {
    /// Creates an orchestrator over the given collaborators.
    pub fn new(auth: Arc<dyn AuthSession>, backend: Arc<dyn FormsBackend>) -> Self {
        Self { auth, backend }
    }

    /// Creates a remote form reproducing `def` and returns its links.
    ///
    /// The two network calls are sequential and dependent: the batch needs
    /// the identifier from the shell creation. The batch is atomic from this
    /// orchestrator's point of view; a failure surfaces the backend's
    /// message verbatim and nothing is rolled back.
    pub async fn create_remote_form(
        &self,
        def: &FormDefinition,
    ) -> Result<CreatedForm, OrchestratorError> {
        if !self.auth.is_signed_in() {
            return Err(OrchestratorError::Unauthenticated);
        }
        let token = self.auth.token().ok_or(OrchestratorError::Unauthenticated)?;

        debug!(phase = ?CreatePhase::Creating, title = %def.title, "creating form shell");
        let shell = self
            .backend
            .create_shell(&token, &def.title)
            .await
            .map_err(|e| OrchestratorError::CreationFailed(e.to_string()))?;
        if shell.form_id.trim().is_empty() {
            return Err(OrchestratorError::CreationFailed(
                "backend returned no form identifier".into(),
            ));
        }

        let ops = compile_mutations(def);
        if !ops.is_empty() {
            debug!(phase = ?CreatePhase::Populating, ops = ops.len(), "applying mutation batch");
            self.backend
                .batch_mutate(&token, &shell.form_id, &ops)
                .await
                .map_err(|e| OrchestratorError::BatchMutationFailed {
                    message: e.to_string(),
                })?;
        }

        info!(
            phase = ?CreatePhase::Done,
            form_id = %shell.form_id,
            share_url = %shell.share_url,
            "remote form created"
        );
        Ok(CreatedForm {
            form_id: shell.form_id,
            edit_url: shell.edit_url,
            share_url: shell.share_url,
        })
    }
}
