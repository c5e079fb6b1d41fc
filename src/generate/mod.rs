//! LLM-backed generation of form definitions from raw user text.
//!
//! [`DefinitionGenerator`] is the only component that talks to the
//! [`TextGenerator`](crate::llm::TextGenerator) collaborator. It builds the
//! prompt, requests a schema-constrained reply, and deserializes it into a
//! [`FormDefinition`]. Validation is the caller's next step; generation
//! itself makes no structural guarantees beyond the wire shape.

use std::sync::Arc;

use tracing::info;

use crate::compile::Locale;
use crate::error::GenerationError;
use crate::llm::TextGenerator;
use crate::model::FormDefinition;
use crate::prompts;

/// Turns raw user text into a [`FormDefinition`] via the LLM collaborator.
pub struct DefinitionGenerator {
    llm: Arc<dyn TextGenerator>,
}

impl DefinitionGenerator {
    /// Creates a generator over the given collaborator.
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm }
    }

    /// Generates a definition from raw input in the given language.
    pub async fn generate_definition(
        &self,
        raw_input: &str,
        locale: Locale,
    ) -> Result<FormDefinition, GenerationError> {
        if raw_input.trim().is_empty() {
            return Err(GenerationError::Other("input is empty".into()));
        }

        let prompt = prompts::build_form_prompt(raw_input);
        let schema = prompts::form_response_schema();
        let system = prompts::system_instruction(locale);

        let value = self.llm.generate(&prompt, system, &schema).await?;
        let definition: FormDefinition = serde_json::from_value(value)?;
        info!(
            title = %definition.title,
            sections = definition.sections.len(),
            questions = definition.question_count(),
            is_quiz = definition.is_quiz,
            "generated form definition"
        );
        Ok(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct CannedGenerator {
        reply: Value,
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(
            &self,
            _prompt: &str,
            _system: &str,
            _schema: &Value,
        ) -> Result<Value, GenerationError> {
            Ok(self.reply.clone())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(
            &self,
            _prompt: &str,
            _system: &str,
            _schema: &Value,
        ) -> Result<Value, GenerationError> {
            Err(GenerationError::SafetyBlocked)
        }
    }

    #[tokio::test]
    async fn parses_a_structured_reply() {
        let generator = DefinitionGenerator::new(Arc::new(CannedGenerator {
            reply: json!({
                "title": "Onboarding",
                "description": "Welcome",
                "isQuiz": false,
                "sections": [{
                    "title": "Basics",
                    "questions": [
                        {"title": "Full name", "type": "SHORT_ANSWER", "required": true}
                    ]
                }]
            }),
        }));
        let def = generator
            .generate_definition("some text", Locale::En)
            .await
            .unwrap();
        assert_eq!(def.title, "Onboarding");
        assert_eq!(def.question_count(), 1);
    }

    #[tokio::test]
    async fn malformed_reply_is_a_generation_error() {
        let generator = DefinitionGenerator::new(Arc::new(CannedGenerator {
            reply: json!({"totally": "unrelated"}),
        }));
        let err = generator
            .generate_definition("some text", Locale::En)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Other(_)));
    }

    #[tokio::test]
    async fn collaborator_errors_pass_through() {
        let generator = DefinitionGenerator::new(Arc::new(FailingGenerator));
        let err = generator
            .generate_definition("some text", Locale::En)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::SafetyBlocked));
    }

    #[tokio::test]
    async fn empty_input_fails_before_calling_the_model() {
        let generator = DefinitionGenerator::new(Arc::new(FailingGenerator));
        let err = generator
            .generate_definition("  \n ", Locale::En)
            .await
            .unwrap_err();
        // FailingGenerator would return SafetyBlocked if it had been called.
        assert!(matches!(err, GenerationError::Other(_)));
    }
}
