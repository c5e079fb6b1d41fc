//! The two code-generation back ends.
//!
//! Both compilers consume the same [`FormDefinition`](crate::model::FormDefinition)
//! and must stay semantically equivalent on everything they share: question
//! kind mapping, option order, correctness marking, and the image fallback
//! behavior. `tests/compile_pipeline.rs` runs shared fixtures through both to
//! keep them from drifting apart.
//!
//! The one deliberate divergence is the points policy on non-quiz forms: the
//! script back end suppresses points unless the form is a quiz, the mutation
//! back end attaches grading on a positive point value alone.

pub mod mutations;
pub mod script;

pub use mutations::{compile_mutations, MutationOp};
pub use script::{compile_script, Locale, ScriptOptions};
