//! formforge: AI-assisted Google Forms generation.
//!
//! Turns raw user text into a normalized [`model::FormDefinition`] via an
//! LLM collaborator, then deterministically compiles that definition into
//! two equivalent executable targets: a batch of Forms API mutations
//! applied by the [`forms::FormOrchestrator`], or a standalone Apps Script
//! the user runs themselves.

// Core modules
pub mod cli;
pub mod compile;
pub mod error;
pub mod forms;
pub mod generate;
pub mod llm;
pub mod model;
pub mod prompts;
pub mod validate;

// Re-export commonly used error types
pub use error::{BackendError, GenerationError, OrchestratorError, ValidationError};
