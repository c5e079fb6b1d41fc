//! Prompts and response schema for form-definition generation.
//!
//! The system instruction teaches the model the normalization conventions
//! the rest of the pipeline relies on: asterisk-marked options become
//! `correctAnswers`, graded content flips `isQuiz`, and Forms API JSON input
//! is transformed rather than echoed. English and Vietnamese variants carry
//! the same rules.

use serde_json::{json, Value};

use crate::compile::Locale;

/// English system instruction for form generation.
pub const FORM_SYSTEM_EN: &str = r#"You are an expert form and quiz generator. Analyze the following content and convert it into a structured JSON object.
1. Extract the main title and description.
2. Group questions into logical sections.
3. For each question, identify its text, type, and required status.
4. CRITICAL (QUIZ): If the content suggests it is a quiz (e.g., has points, correct answers), set `isQuiz: true` at the top level.
5. CORRECT ANSWERS: For multiple choice or checkbox questions, if an option ends with an asterisk (*), it is the correct answer. Add the option's text (without the *) to the `correctAnswers` array for that question.
6. POINTS: If a question has a correct answer, assign it a point value (e.g., 10) in the `points` field. If the user specifies a default point value, use that instead.
7. GOOGLE FORMS API JSON: If the input is a JSON from the Google Forms API, parse it and transform it into the target schema.
8. Return a single, valid JSON object matching the provided schema."#;

/// Vietnamese system instruction for form generation.
pub const FORM_SYSTEM_VI: &str = "B\u{1ea1}n l\u{00e0} m\u{1ed9}t chuy\u{00ea}n gia t\u{1ea1}o bi\u{1ec3}u m\u{1eab}u v\u{00e0} b\u{00e0}i ki\u{1ec3}m tra. H\u{00e3}y ph\u{00e2}n t\u{00ed}ch n\u{1ed9}i dung sau v\u{00e0} chuy\u{1ec3}n n\u{00f3} th\u{00e0}nh m\u{1ed9}t \u{0111}\u{1ed1}i t\u{01b0}\u{1ee3}ng JSON c\u{00f3} c\u{1ea5}u tr\u{00fa}c.\n\
1. Tr\u{00ed}ch xu\u{1ea5}t ti\u{00ea}u \u{0111}\u{1ec1} ch\u{00ed}nh v\u{00e0} m\u{00f4} t\u{1ea3}.\n\
2. Nh\u{00f3}m c\u{00e2}u h\u{1ecf}i v\u{00e0}o c\u{00e1}c ph\u{1ea7}n h\u{1ee3}p l\u{00fd}.\n\
3. \u{0110}\u{1ed1}i v\u{1edb}i m\u{1ed7}i c\u{00e2}u h\u{1ecf}i, x\u{00e1}c \u{0111}\u{1ecb}nh v\u{0103}n b\u{1ea3}n, lo\u{1ea1}i, v\u{00e0} tr\u{1ea1}ng th\u{00e1}i b\u{1eaf}t bu\u{1ed9}c.\n\
4. QUAN TR\u{1eca}NG (QUIZ): N\u{1ebf}u n\u{1ed9}i dung g\u{1ee3}i \u{00fd} \u{0111}\u{00e2}y l\u{00e0} m\u{1ed9}t b\u{00e0}i ki\u{1ec3}m tra (v\u{00ed} d\u{1ee5}: c\u{00f3} \u{0111}i\u{1ec3}m, c\u{00f3} \u{0111}\u{00e1}p \u{00e1}n \u{0111}\u{00fa}ng), h\u{00e3}y \u{0111}\u{1eb7}t `isQuiz: true` \u{1edf} c\u{1ea5}p \u{0111}\u{1ed9} cao nh\u{1ea5}t.\n\
5. \u{0110}\u{00c1}P \u{00c1}N \u{0110}\u{00da}NG: \u{0110}\u{1ed1}i v\u{1edb}i c\u{00e2}u h\u{1ecf}i tr\u{1eaf}c nghi\u{1ec7}m ho\u{1eb7}c h\u{1ed9}p ki\u{1ec3}m, n\u{1ebf}u m\u{1ed9}t l\u{1ef1}a ch\u{1ecd}n k\u{1ebf}t th\u{00fa}c b\u{1eb1}ng d\u{1ea5}u hoa th\u{1ecb} (*), \u{0111}\u{00f3} l\u{00e0} c\u{00e2}u tr\u{1ea3} l\u{1edd}i \u{0111}\u{00fa}ng. Th\u{00ea}m v\u{0103}n b\u{1ea3}n c\u{1ee7}a l\u{1ef1}a ch\u{1ecd}n \u{0111}\u{00f3} (kh\u{00f4}ng c\u{00f3} d\u{1ea5}u *) v\u{00e0}o m\u{1ea3}ng `correctAnswers`.\n\
6. \u{0110}I\u{1ec2}M S\u{1ed0}: N\u{1ebf}u m\u{1ed9}t c\u{00e2}u h\u{1ecf}i c\u{00f3} \u{0111}\u{00e1}p \u{00e1}n \u{0111}\u{00fa}ng, h\u{00e3}y g\u{00e1}n cho n\u{00f3} m\u{1ed9}t s\u{1ed1} \u{0111}i\u{1ec3}m (v\u{00ed} d\u{1ee5}: 10) v\u{00e0}o tr\u{01b0}\u{1edd}ng `points`.\n\
7. GOOGLE FORMS API JSON: N\u{1ebf}u \u{0111}\u{1ea7}u v\u{00e0}o l\u{00e0} JSON t\u{1eeb} API Google Forms, h\u{00e3}y ph\u{00e2}n t\u{00ed}ch v\u{00e0} chuy\u{1ec3}n \u{0111}\u{1ed5}i sang schema m\u{1ee5}c ti\u{00ea}u.\n\
8. Ch\u{1ec9} tr\u{1ea3} v\u{1ec1} m\u{1ed9}t \u{0111}\u{1ed1}i t\u{01b0}\u{1ee3}ng JSON h\u{1ee3}p l\u{1ec7} duy nh\u{1ea5}t kh\u{1edb}p v\u{1edb}i schema \u{0111}\u{00e3} cung c\u{1ea5}p.";

/// Returns the system instruction for the given locale.
pub fn system_instruction(locale: Locale) -> &'static str {
    match locale {
        Locale::En => FORM_SYSTEM_EN,
        Locale::Vi => FORM_SYSTEM_VI,
    }
}

/// Wraps the raw user content for the generation call.
pub fn build_form_prompt(raw_input: &str) -> String {
    format!("Here is the content to analyze:\n---\n{raw_input}\n---")
}

/// Response schema constraining the model to the
/// [`FormDefinition`](crate::model::FormDefinition) wire shape.
pub fn form_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "The main title of the form, extracted from the user's input."
            },
            "description": {
                "type": "STRING",
                "description": "A brief description or introduction for the form."
            },
            "isQuiz": {
                "type": "BOOLEAN",
                "description": "Set to true if the input suggests this is a quiz, test, or assessment."
            },
            "sections": {
                "type": "ARRAY",
                "description": "An array of form sections. Each section represents a page in the form.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {
                            "type": "STRING",
                            "description": "The title for this section/page of the form."
                        },
                        "description": {
                            "type": "STRING",
                            "description": "An optional description for this section."
                        },
                        "questions": {
                            "type": "ARRAY",
                            "description": "An array of question objects for this section.",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "title": {
                                        "type": "STRING",
                                        "description": "The text of the question."
                                    },
                                    "type": {
                                        "type": "STRING",
                                        "description": "One of: SHORT_ANSWER, PARAGRAPH, MULTIPLE_CHOICE, CHECKBOXES, IMAGE_DISPLAY."
                                    },
                                    "options": {
                                        "type": "ARRAY",
                                        "description": "Options for MULTIPLE_CHOICE or CHECKBOXES questions, with any correct-answer marker (*) removed.",
                                        "items": { "type": "STRING" }
                                    },
                                    "imageUrl": {
                                        "type": "STRING",
                                        "description": "URL of an image for this question. Empty string if not applicable."
                                    },
                                    "required": {
                                        "type": "BOOLEAN",
                                        "description": "Whether the question is mandatory."
                                    },
                                    "points": {
                                        "type": "INTEGER",
                                        "description": "Point value when part of a quiz. Omit or 0 otherwise."
                                    },
                                    "correctAnswers": {
                                        "type": "ARRAY",
                                        "description": "Correct answer(s); for choice questions these match option texts.",
                                        "items": { "type": "STRING" }
                                    }
                                },
                                "required": ["title", "type"]
                            }
                        }
                    },
                    "required": ["title", "questions"]
                }
            }
        },
        "required": ["title", "description", "sections"]
    })
}
