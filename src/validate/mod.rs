//! Structural validation and normalization of form definitions.
//!
//! [`validate`] is the gate between the generation step and the two
//! compilers: a definition that passes is guaranteed to compile on both back
//! ends without further checks. Checks run in a fixed order and short-circuit
//! on the first failure; correctness-marking problems are softened to
//! warnings (the offending entries are dropped) so the compilers stay total.

use tracing::warn;

use crate::error::ValidationError;
use crate::model::FormDefinition;

/// Validates and normalizes a form definition.
///
/// Checks, in order, short-circuiting on the first failure:
/// 1. the form title is non-empty after trimming;
/// 2. there is at least one section;
/// 3. every section has at least one question;
/// 4. every choice question has at least one option.
///
/// Normalization applied to the returned definition:
/// - `correct_answers` entries that match no option are dropped with a
///   warning rather than rejected;
/// - blank `image_url` values (the generation schema emits an empty string
///   for "no image") become `None`.
pub fn validate(def: FormDefinition) -> Result<FormDefinition, ValidationError> {
    if def.title.trim().is_empty() {
        return Err(ValidationError::new("title", "must not be empty"));
    }
    if def.sections.is_empty() {
        return Err(ValidationError::new(
            "sections",
            "a form needs at least one section",
        ));
    }
    // Each check runs over the whole definition before the next one starts,
    // so an empty section anywhere reports before any option problem.
    for (si, section) in def.sections.iter().enumerate() {
        if section.questions.is_empty() {
            return Err(ValidationError::new(
                format!("sections[{si}].questions"),
                "a section needs at least one question",
            ));
        }
    }
    for (si, section) in def.sections.iter().enumerate() {
        for (qi, question) in section.questions.iter().enumerate() {
            if question.kind.is_choice() && question.options.is_empty() {
                return Err(ValidationError::new(
                    format!("sections[{si}].questions[{qi}].options"),
                    "a choice question needs at least one option",
                ));
            }
        }
    }

    Ok(normalize(def))
}

/// Applies the non-fatal cleanups described on [`validate`].
fn normalize(mut def: FormDefinition) -> FormDefinition {
    for section in &mut def.sections {
        for question in &mut section.questions {
            question.image_url = question
                .image_url
                .take()
                .filter(|url| !url.trim().is_empty());

            if question.kind.is_choice() && !question.correct_answers.is_empty() {
                let options = &question.options;
                let before = question.correct_answers.len();
                question
                    .correct_answers
                    .retain(|answer| options.contains(answer));
                let dropped = before - question.correct_answers.len();
                if dropped > 0 {
                    warn!(
                        question = %question.title,
                        dropped,
                        "dropped correct answers that match no option"
                    );
                }
            }
        }
    }
    def
}
