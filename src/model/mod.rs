//! The form definition model shared by every formforge component.
//!
//! A [`FormDefinition`] is the normalized, backend-independent representation
//! of a form or quiz. It is produced once (usually by the LLM-backed
//! [`DefinitionGenerator`](crate::generate::DefinitionGenerator)), validated,
//! and thereafter consumed as immutable input by both compilers. Wire names
//! follow the structured-response schema in [`crate::prompts`], so a model
//! reply deserializes straight into these types.

use serde::{Deserialize, Serialize};

/// The closed vocabulary of question kinds.
///
/// Unrecognized kind strings deserialize to [`QuestionKind::Unsupported`],
/// which both compilers map to a plain text question. This keeps compilation
/// total over anything the generation step can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionKind {
    /// Single-line free text.
    ShortAnswer,
    /// Multi-line free text.
    Paragraph,
    /// Single-select choice (radio).
    MultipleChoice,
    /// Multi-select choice (checkboxes).
    Checkboxes,
    /// A display-only image; the question carries no answerable content.
    ImageDisplay,
    /// Fallback arm for kind strings this version does not know.
    #[serde(other)]
    Unsupported,
}

impl QuestionKind {
    /// Whether this kind carries an options list.
    pub fn is_choice(self) -> bool {
        matches!(self, QuestionKind::MultipleChoice | QuestionKind::Checkboxes)
    }
}

/// A single question within a form section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Question text. May contain embedded newlines; compilers escape them.
    pub title: String,

    /// Question kind.
    #[serde(rename = "type")]
    pub kind: QuestionKind,

    /// Options for choice kinds, in display order. Ignored otherwise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    /// For [`QuestionKind::ImageDisplay`] the sole content of the item; for
    /// any other kind an attachment image. A fetch failure downstream never
    /// aborts compilation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Whether an answer is mandatory.
    #[serde(default)]
    pub required: bool,

    /// Point value when the owning form is graded as a quiz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,

    /// Correct answers for choice kinds, each matching an entry of `options`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub correct_answers: Vec<String>,
}

impl Question {
    /// Creates a question with the given title and kind; everything else
    /// takes its default.
    pub fn new(title: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            title: title.into(),
            kind,
            options: Vec::new(),
            image_url: None,
            required: false,
            points: None,
            correct_answers: Vec::new(),
        }
    }

    /// Sets the options list.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the correct answers.
    pub fn with_correct_answers<I, S>(mut self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.correct_answers = answers.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the question as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the point value.
    pub fn with_points(mut self, points: u32) -> Self {
        self.points = Some(points);
        self
    }

    /// Sets the image URL.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Point value to use for grading, treating 0 and absent the same.
    pub fn effective_points(&self) -> Option<u32> {
        self.points.filter(|p| *p > 0)
    }
}

/// One page of a form, holding an ordered run of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSection {
    /// Section title, shown on the page break that opens the section.
    pub title: String,
    /// Optional section description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Questions in display order. Never reordered by any component.
    pub questions: Vec<Question>,
}

impl FormSection {
    /// Creates a section from a title and questions.
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            title: title.into(),
            description: None,
            questions,
        }
    }

    /// Sets the section description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Quiz presentation settings.
///
/// The script compiler cannot set these programmatically (the Apps Script
/// form API has no setters for them) and emits a comment instead; the
/// mutation compiler maps them 1:1 onto the backend's grade policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSettings {
    /// Release scores immediately after submission.
    #[serde(default)]
    pub release_immediately: bool,
    /// Show respondents which answers were correct.
    #[serde(default)]
    pub show_correct_answers: bool,
    /// Show respondents the point value of each question.
    #[serde(default)]
    pub show_point_values: bool,
}

/// The normalized, backend-independent representation of a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    /// Form title.
    pub title: String,
    /// Optional form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sections in display order; at least one after validation.
    pub sections: Vec<FormSection>,
    /// Whether the form is graded as a quiz.
    #[serde(default)]
    pub is_quiz: bool,
    /// Quiz presentation settings; meaningful only when `is_quiz` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_settings: Option<QuizSettings>,
}

impl FormDefinition {
    /// Creates a non-quiz definition from a title and its sections.
    pub fn new(title: impl Into<String>, sections: Vec<FormSection>) -> Self {
        Self {
            title: title.into(),
            description: None,
            sections,
            is_quiz: false,
            quiz_settings: None,
        }
    }

    /// Sets the form description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the form as a quiz.
    pub fn as_quiz(mut self) -> Self {
        self.is_quiz = true;
        self
    }

    /// Sets the quiz presentation settings (implies quiz).
    pub fn with_quiz_settings(mut self, settings: QuizSettings) -> Self {
        self.is_quiz = true;
        self.quiz_settings = Some(settings);
        self
    }

    /// Total number of questions across all sections.
    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_wire_names_are_screaming_snake() {
        let json = serde_json::to_string(&QuestionKind::ShortAnswer).unwrap();
        assert_eq!(json, "\"SHORT_ANSWER\"");
        let kind: QuestionKind = serde_json::from_str("\"CHECKBOXES\"").unwrap();
        assert_eq!(kind, QuestionKind::Checkboxes);
    }

    #[test]
    fn unknown_kind_falls_back_to_unsupported() {
        let kind: QuestionKind = serde_json::from_str("\"DATE_PICKER\"").unwrap();
        assert_eq!(kind, QuestionKind::Unsupported);
    }

    #[test]
    fn definition_round_trips_through_wire_format() {
        let def = FormDefinition::new(
            "Course Feedback",
            vec![FormSection::new(
                "About you",
                vec![Question::new("Your name?", QuestionKind::ShortAnswer).required()],
            )],
        )
        .with_description("Help us improve.");

        let json = serde_json::to_value(&def).unwrap();
        assert_eq!(json["sections"][0]["questions"][0]["type"], "SHORT_ANSWER");
        assert_eq!(json["sections"][0]["questions"][0]["required"], true);

        let back: FormDefinition = serde_json::from_value(json).unwrap();
        assert_eq!(back, def);
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let def: FormDefinition = serde_json::from_str(
            r#"{
                "title": "T",
                "sections": [
                    {"title": "S", "questions": [{"title": "Q", "type": "PARAGRAPH"}]}
                ]
            }"#,
        )
        .unwrap();
        assert!(!def.is_quiz);
        assert!(def.quiz_settings.is_none());
        let q = &def.sections[0].questions[0];
        assert!(!q.required);
        assert!(q.options.is_empty());
        assert!(q.points.is_none());
    }

    #[test]
    fn effective_points_ignores_zero() {
        let q = Question::new("Q", QuestionKind::MultipleChoice).with_points(0);
        assert_eq!(q.effective_points(), None);
        let q = q.with_points(10);
        assert_eq!(q.effective_points(), Some(10));
    }
}
