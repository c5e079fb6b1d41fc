//! Compiles a form definition into Google Forms `batchUpdate` mutations.
//!
//! [`compile_mutations`] is a pure, total function over any validated
//! [`FormDefinition`]: it performs no I/O and never fails. The returned list
//! serializes one-to-one into the request body of the backend's batch
//! endpoint, so the [`FormOrchestrator`](crate::forms::FormOrchestrator) can
//! hand it over without further shaping.
//!
//! Item payloads are closed structs and enums rather than free-form JSON;
//! every question kind has an explicit arm in [`map_question`], with
//! unrecognized kinds falling back to a plain text question.

use serde::Serialize;

use crate::model::{FormDefinition, Question, QuestionKind, QuizSettings};

/// One atomic structural change in the backend's batch protocol.
///
/// Externally tagged so the serialized form is exactly the wire shape:
/// `{"updateSettings": {...}}` or `{"createItem": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MutationOp {
    /// Turn on quiz mode and set the grade release policy.
    UpdateSettings(UpdateSettingsRequest),
    /// Insert one item at a fixed index.
    CreateItem(CreateItemRequest),
}

impl MutationOp {
    /// Returns the insertion index when this op creates an item.
    pub fn insert_index(&self) -> Option<u32> {
        match self {
            MutationOp::CreateItem(req) => Some(req.location.index),
            MutationOp::UpdateSettings(_) => None,
        }
    }
}

/// Payload of an `updateSettings` op.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub settings: FormSettings,
    pub update_mask: String,
}

/// Form-level settings carried by an `updateSettings` op.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSettings {
    pub quiz_settings: QuizSettingsPayload,
}

/// Quiz flag plus optional grade release policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSettingsPayload {
    pub is_quiz: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<GradePolicy>,
}

/// Grade release policy derived 1:1 from [`QuizSettings`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradePolicy {
    pub score: ScoreRelease,
    pub correct_answers_shown: bool,
    pub points_shown: bool,
}

/// When respondents see their score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreRelease {
    Released,
    NotReleased,
}

/// Payload of a `createItem` op.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub item: FormItem,
    pub location: Location,
}

/// Insertion position of a created item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub index: u32,
}

/// One form item: a question, a display image, or a page break.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormItem {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub content: ItemContent,
}

/// The kind-specific body of a [`FormItem`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemContent {
    /// An answerable question.
    QuestionItem(QuestionItem),
    /// A display-only image; no question wrapper at all.
    ImageItem(ImageItem),
    /// A structural marker that starts a new page.
    PageBreakItem(PageBreakItem),
}

/// An empty marker body; serializes to `{}` as the wire format expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageBreakItem {}

/// Wrapper around a question and its optional side image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionItem {
    pub question: QuestionPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ItemImage>,
}

/// Common question fields plus the kind-specific variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPayload {
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grading: Option<Grading>,
    #[serde(flatten)]
    pub variant: QuestionVariant,
}

/// Kind-specific question body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionVariant {
    /// Free text, single or multi line.
    #[serde(rename_all = "camelCase")]
    TextQuestion { paragraph: bool },
    /// Single- or multi-select over a fixed options list.
    #[serde(rename_all = "camelCase")]
    ChoiceQuestion {
        #[serde(rename = "type")]
        choice_type: ChoiceType,
        options: Vec<ChoiceOption>,
    },
}

/// Choice presentation style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChoiceType {
    Radio,
    Checkbox,
}

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceOption {
    pub value: String,
}

/// Point value and correct answers used by the backend to auto-score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grading {
    pub point_value: u32,
    pub correct_answers: CorrectAnswers,
}

/// Wrapper the wire format requires around the answer list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrectAnswers {
    pub answers: Vec<AnswerValue>,
}

/// One correct answer, by option text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerValue {
    pub value: String,
}

/// A display-only image item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageItem {
    pub image: ItemImage,
}

/// An image payload, fetched by the backend from a source URI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemImage {
    pub source_uri: String,
    pub properties: ImageProperties,
}

/// Image layout properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageProperties {
    pub alignment: ImageAlignment,
}

/// Horizontal alignment of an image within the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageAlignment {
    Left,
    Center,
    Right,
}

impl ItemImage {
    fn centered(source_uri: impl Into<String>) -> Self {
        Self {
            source_uri: source_uri.into(),
            properties: ImageProperties {
                alignment: ImageAlignment::Center,
            },
        }
    }
}

/// Compiles a validated definition into an ordered mutation list.
///
/// Produces, in order: one `updateSettings` op when the form is a quiz, then
/// every question section-major/question-minor as `createItem` ops with a
/// strictly increasing insertion index, with a page-break item between
/// consecutive sections (never after the last).
pub fn compile_mutations(def: &FormDefinition) -> Vec<MutationOp> {
    let mut ops = Vec::with_capacity(
        def.question_count() + def.sections.len().saturating_sub(1) + usize::from(def.is_quiz),
    );

    if def.is_quiz {
        ops.push(MutationOp::UpdateSettings(quiz_settings_request(
            def.quiz_settings.as_ref(),
        )));
    }

    let mut index: u32 = 0;
    let mut push_item = |ops: &mut Vec<MutationOp>, item: FormItem| {
        ops.push(MutationOp::CreateItem(CreateItemRequest {
            item,
            location: Location { index },
        }));
        index += 1;
    };

    for (si, section) in def.sections.iter().enumerate() {
        for question in &section.questions {
            push_item(&mut ops, map_question(question));
        }
        // Page break carrying the next section's title, skipped after the last.
        if let Some(next) = def.sections.get(si + 1) {
            push_item(
                &mut ops,
                FormItem {
                    title: next.title.clone(),
                    description: next.description.clone(),
                    content: ItemContent::PageBreakItem(PageBreakItem {}),
                },
            );
        }
    }

    ops
}

fn quiz_settings_request(settings: Option<&QuizSettings>) -> UpdateSettingsRequest {
    let mut mask = vec!["quizSettings.isQuiz"];
    let grade = settings.map(|s| {
        mask.push("quizSettings.grade");
        GradePolicy {
            score: if s.release_immediately {
                ScoreRelease::Released
            } else {
                ScoreRelease::NotReleased
            },
            correct_answers_shown: s.show_correct_answers,
            points_shown: s.show_point_values,
        }
    });
    UpdateSettingsRequest {
        settings: FormSettings {
            quiz_settings: QuizSettingsPayload {
                is_quiz: true,
                grade,
            },
        },
        update_mask: mask.join(","),
    }
}

/// Maps one question onto its item payload.
///
/// Grading is attached whenever the question carries a positive point value,
/// independent of the form-level quiz flag; the script compiler is stricter.
/// That divergence is deliberate and pinned by tests on both sides.
fn map_question(question: &Question) -> FormItem {
    // Display images short-circuit to a distinct item shape with no question
    // wrapper; grading and attachments never apply to them.
    if question.kind == QuestionKind::ImageDisplay {
        return FormItem {
            title: question.title.clone(),
            description: None,
            content: ItemContent::ImageItem(ImageItem {
                image: ItemImage::centered(question.image_url.clone().unwrap_or_default()),
            }),
        };
    }

    let grading = question.effective_points().map(|points| Grading {
        point_value: points,
        correct_answers: CorrectAnswers {
            answers: question
                .correct_answers
                .iter()
                .map(|a| AnswerValue { value: a.clone() })
                .collect(),
        },
    });

    let variant = match question.kind {
        QuestionKind::Paragraph => QuestionVariant::TextQuestion { paragraph: true },
        QuestionKind::MultipleChoice | QuestionKind::Checkboxes => {
            QuestionVariant::ChoiceQuestion {
                choice_type: if question.kind == QuestionKind::MultipleChoice {
                    ChoiceType::Radio
                } else {
                    ChoiceType::Checkbox
                },
                options: question
                    .options
                    .iter()
                    .map(|o| ChoiceOption { value: o.clone() })
                    .collect(),
            }
        }
        // ShortAnswer, plus the fallback for unrecognized kinds.
        QuestionKind::ShortAnswer | QuestionKind::Unsupported => {
            QuestionVariant::TextQuestion { paragraph: false }
        }
        QuestionKind::ImageDisplay => unreachable!("handled above"),
    };

    let image = question
        .image_url
        .as_deref()
        .map(|url| ItemImage::centered(url));

    FormItem {
        title: question.title.clone(),
        description: None,
        content: ItemContent::QuestionItem(QuestionItem {
            question: QuestionPayload {
                required: question.required,
                grading,
                variant,
            },
            image,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FormSection, Question, QuestionKind};
    use serde_json::json;

    fn single_question_def() -> FormDefinition {
        FormDefinition::new(
            "T",
            vec![FormSection::new(
                "S1",
                vec![Question::new("Name?", QuestionKind::ShortAnswer).required()],
            )],
        )
    }

    #[test]
    fn non_quiz_single_question_compiles_to_one_create() {
        let ops = compile_mutations(&single_question_def());
        assert_eq!(ops.len(), 1);
        let MutationOp::CreateItem(req) = &ops[0] else {
            panic!("expected createItem, got {:?}", ops[0]);
        };
        assert_eq!(req.location.index, 0);
        assert_eq!(req.item.title, "Name?");
        match &req.item.content {
            ItemContent::QuestionItem(qi) => {
                assert!(qi.question.required);
                assert_eq!(
                    qi.question.variant,
                    QuestionVariant::TextQuestion { paragraph: false }
                );
            }
            other => panic!("expected questionItem, got {other:?}"),
        }
    }

    #[test]
    fn op_count_matches_questions_plus_breaks_plus_quiz_flag() {
        let def = FormDefinition::new(
            "T",
            vec![
                FormSection::new(
                    "A",
                    vec![
                        Question::new("q1", QuestionKind::ShortAnswer),
                        Question::new("q2", QuestionKind::Paragraph),
                    ],
                ),
                FormSection::new("B", vec![Question::new("q3", QuestionKind::ShortAnswer)]),
                FormSection::new("C", vec![Question::new("q4", QuestionKind::Paragraph)]),
            ],
        )
        .as_quiz();

        let ops = compile_mutations(&def);
        // 4 questions + 2 page breaks + 1 settings op.
        assert_eq!(ops.len(), 7);
        assert!(matches!(ops[0], MutationOp::UpdateSettings(_)));

        let indices: Vec<u32> = ops.iter().filter_map(MutationOp::insert_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn two_sections_interleave_a_page_break() {
        let def = FormDefinition::new(
            "T",
            vec![
                FormSection::new("One", vec![Question::new("q1", QuestionKind::ShortAnswer)]),
                FormSection::new("Two", vec![Question::new("q2", QuestionKind::ShortAnswer)])
                    .with_description("second page"),
            ],
        );
        let ops = compile_mutations(&def);
        assert_eq!(ops.len(), 3);

        let MutationOp::CreateItem(break_req) = &ops[1] else {
            panic!("expected createItem");
        };
        assert_eq!(break_req.item.title, "Two");
        assert_eq!(break_req.item.description.as_deref(), Some("second page"));
        assert!(matches!(
            break_req.item.content,
            ItemContent::PageBreakItem(_)
        ));
    }

    #[test]
    fn no_update_settings_for_non_quiz() {
        let ops = compile_mutations(&single_question_def());
        assert!(ops
            .iter()
            .all(|op| !matches!(op, MutationOp::UpdateSettings(_))));
    }

    #[test]
    fn quiz_with_settings_derives_grade_policy() {
        let def = single_question_def().with_quiz_settings(crate::model::QuizSettings {
            release_immediately: true,
            show_correct_answers: false,
            show_point_values: true,
        });
        let ops = compile_mutations(&def);
        let MutationOp::UpdateSettings(req) = &ops[0] else {
            panic!("expected updateSettings first");
        };
        assert_eq!(req.update_mask, "quizSettings.isQuiz,quizSettings.grade");
        let grade = req.settings.quiz_settings.grade.as_ref().unwrap();
        assert_eq!(grade.score, ScoreRelease::Released);
        assert!(!grade.correct_answers_shown);
        assert!(grade.points_shown);
    }

    #[test]
    fn quiz_without_settings_masks_only_the_flag() {
        let def = single_question_def().as_quiz();
        let ops = compile_mutations(&def);
        let MutationOp::UpdateSettings(req) = &ops[0] else {
            panic!("expected updateSettings first");
        };
        assert_eq!(req.update_mask, "quizSettings.isQuiz");
        assert!(req.settings.quiz_settings.grade.is_none());
    }

    #[test]
    fn choice_question_preserves_option_order_and_correctness() {
        let def = FormDefinition::new(
            "T",
            vec![FormSection::new(
                "S",
                vec![Question::new("Pick", QuestionKind::MultipleChoice)
                    .with_options(["a", "b", "c"])
                    .with_correct_answers(["b"])
                    .with_points(10)],
            )],
        )
        .as_quiz();

        let ops = compile_mutations(&def);
        assert_eq!(ops.len(), 2);
        let MutationOp::CreateItem(req) = &ops[1] else {
            panic!("expected createItem");
        };
        let ItemContent::QuestionItem(qi) = &req.item.content else {
            panic!("expected questionItem");
        };
        let QuestionVariant::ChoiceQuestion {
            choice_type,
            options,
        } = &qi.question.variant
        else {
            panic!("expected choiceQuestion");
        };
        assert_eq!(*choice_type, ChoiceType::Radio);
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["a", "b", "c"]);

        let grading = qi.question.grading.as_ref().unwrap();
        assert_eq!(grading.point_value, 10);
        assert_eq!(grading.correct_answers.answers.len(), 1);
        assert_eq!(grading.correct_answers.answers[0].value, "b");
    }

    #[test]
    fn grading_attaches_even_without_quiz_flag() {
        // Deliberate policy: points alone attach grading here, while the
        // script compiler gates on the quiz flag.
        let def = FormDefinition::new(
            "T",
            vec![FormSection::new(
                "S",
                vec![Question::new("Pick", QuestionKind::Checkboxes)
                    .with_options(["x"])
                    .with_points(5)],
            )],
        );
        let ops = compile_mutations(&def);
        let MutationOp::CreateItem(req) = &ops[0] else {
            panic!("expected createItem");
        };
        let ItemContent::QuestionItem(qi) = &req.item.content else {
            panic!("expected questionItem");
        };
        assert_eq!(qi.question.grading.as_ref().unwrap().point_value, 5);
    }

    #[test]
    fn image_display_has_no_question_wrapper_and_no_grading() {
        let mut q = Question::new("Look at this", QuestionKind::ImageDisplay)
            .with_image_url("https://example.com/pic.png");
        q.points = Some(10);
        let def = FormDefinition::new("T", vec![FormSection::new("S", vec![q])]).as_quiz();

        let ops = compile_mutations(&def);
        let MutationOp::CreateItem(req) = &ops[1] else {
            panic!("expected createItem");
        };
        let ItemContent::ImageItem(img) = &req.item.content else {
            panic!("expected imageItem, got {:?}", req.item.content);
        };
        assert_eq!(img.image.source_uri, "https://example.com/pic.png");
        assert_eq!(img.image.properties.alignment, ImageAlignment::Center);
        assert_eq!(req.item.title, "Look at this");
    }

    #[test]
    fn attachment_image_rides_on_the_question_item() {
        let def = FormDefinition::new(
            "T",
            vec![FormSection::new(
                "S",
                vec![Question::new("Describe the logo", QuestionKind::Paragraph)
                    .with_image_url("https://example.com/logo.png")],
            )],
        );
        let ops = compile_mutations(&def);
        let MutationOp::CreateItem(req) = &ops[0] else {
            panic!("expected createItem");
        };
        let ItemContent::QuestionItem(qi) = &req.item.content else {
            panic!("expected questionItem");
        };
        let image = qi.image.as_ref().unwrap();
        assert_eq!(image.source_uri, "https://example.com/logo.png");
        assert_eq!(image.properties.alignment, ImageAlignment::Center);
    }

    #[test]
    fn unsupported_kind_falls_back_to_text_question() {
        let def = FormDefinition::new(
            "T",
            vec![FormSection::new(
                "S",
                vec![Question::new("???", QuestionKind::Unsupported)],
            )],
        );
        let ops = compile_mutations(&def);
        let MutationOp::CreateItem(req) = &ops[0] else {
            panic!("expected createItem");
        };
        let ItemContent::QuestionItem(qi) = &req.item.content else {
            panic!("expected questionItem");
        };
        assert_eq!(
            qi.question.variant,
            QuestionVariant::TextQuestion { paragraph: false }
        );
    }

    #[test]
    fn compilation_is_structurally_idempotent() {
        let def = FormDefinition::new(
            "T",
            vec![
                FormSection::new(
                    "A",
                    vec![Question::new("q1", QuestionKind::MultipleChoice)
                        .with_options(["x", "y"])
                        .with_correct_answers(["y"])
                        .with_points(3)],
                ),
                FormSection::new("B", vec![Question::new("q2", QuestionKind::Paragraph)]),
            ],
        )
        .as_quiz();
        assert_eq!(compile_mutations(&def), compile_mutations(&def));
    }

    #[test]
    fn ops_serialize_to_the_batch_wire_shape() {
        let ops = compile_mutations(&single_question_def());
        let wire = serde_json::to_value(&ops).unwrap();
        assert_eq!(
            wire,
            json!([{
                "createItem": {
                    "item": {
                        "title": "Name?",
                        "questionItem": {
                            "question": {
                                "required": true,
                                "textQuestion": { "paragraph": false }
                            }
                        }
                    },
                    "location": { "index": 0 }
                }
            }])
        );
    }

    #[test]
    fn page_break_serializes_to_empty_object() {
        let wire = serde_json::to_value(FormItem {
            title: "Next".into(),
            description: None,
            content: ItemContent::PageBreakItem(PageBreakItem {}),
        })
        .unwrap();
        assert_eq!(wire, json!({"title": "Next", "pageBreakItem": {}}));
    }
}
