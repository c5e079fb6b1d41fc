//! Integration tests for the Gemini client.
//!
//! These tests make real API calls to Gemini.
//! Run with: GEMINI_API_KEY=your_key cargo test --test llm_integration -- --ignored

use std::sync::Arc;

use formforge::compile::Locale;
use formforge::generate::DefinitionGenerator;
use formforge::llm::{GeminiClient, TextGenerator};
use formforge::prompts;
use formforge::validate::validate;

fn create_test_client() -> GeminiClient {
    let api_key = std::env::var("GEMINI_API_KEY")
        .expect("GEMINI_API_KEY environment variable must be set for integration tests");
    GeminiClient::new(api_key)
}

#[tokio::test]
#[ignore] // Run with: cargo test --test llm_integration -- --ignored
async fn test_schema_constrained_generation() {
    let client = create_test_client();
    let schema = prompts::form_response_schema();
    let prompt = prompts::build_form_prompt(
        "# Lunch Survey\nWhat is your name? (short answer, required)\n\
         Which days suit you? (checkboxes) Monday, Tuesday, Friday",
    );

    let value = client
        .generate(&prompt, prompts::system_instruction(Locale::En), &schema)
        .await
        .expect("generation should succeed");

    assert!(value.get("title").is_some(), "reply must carry a title");
    assert!(
        value["sections"].as_array().map_or(false, |s| !s.is_empty()),
        "reply must carry at least one section"
    );
}

#[tokio::test]
#[ignore]
async fn test_generated_definition_validates_and_compiles() {
    let generator = DefinitionGenerator::new(Arc::new(create_test_client()));
    let def = generator
        .generate_definition(
            "Quiz: Geography. Q1 (10 points): Capital of France? Lyon, Paris*, Nice",
            Locale::En,
        )
        .await
        .expect("generation should succeed");

    let def = validate(def).expect("generated definition should validate");
    assert!(def.question_count() >= 1);

    let ops = formforge::compile::compile_mutations(&def);
    assert!(!ops.is_empty());
    let script = formforge::compile::compile_script(&def, &Default::default());
    assert!(script.contains("FormApp.create("));
}
