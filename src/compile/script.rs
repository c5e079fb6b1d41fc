//! Compiles a form definition into a standalone Google Apps Script.
//!
//! The emitted script is pasted by the user into the Apps Script editor and
//! run unattended; it rebuilds the form from scratch through `FormApp`, and
//! can optionally provision a companion results spreadsheet. The compiler is
//! pure: same definition, same options, structurally the same script (only
//! the per-item variable suffixes are randomized, and nothing reads them).
//!
//! Every literal interpolated into the script passes through [`js_str`]. An
//! embedded quote or newline that escaped encoding would produce a script
//! the user cannot run, so nothing is ever spliced in raw.

use clap::ValueEnum;
use rand::distr::{Alphanumeric, Distribution};

use crate::model::{FormDefinition, Question, QuestionKind};

/// Language of the instruction comments in the emitted script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Vietnamese.
    Vi,
}

/// Options for [`compile_script`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptOptions {
    /// Language for the static instruction text.
    pub locale: Locale,
    /// Also provision a spreadsheet and bind it as the response destination.
    pub create_results_sheet: bool,
}

const HEADER_EN: &str = "/**\n\
 * This Google Apps Script will create a new Google Form based on your specifications.\n\
 * To use it:\n\
 * 1. Open a Google Sheet or Google Docs.\n\
 * 2. Go to Extensions > Apps Script.\n\
 * 3. Paste this entire code into the editor, replacing any existing code.\n\
 * 4. Click the \"Save project\" icon.\n\
 * 5. From the function dropdown, select \"createGoogleFormFromAI\" and click \"Run\".\n\
 * 6. You will be asked to grant permissions. Follow the prompts to allow the script to run.\n\
 * 7. A new Google Form will be created in your Google Drive.\n\
 */";

const HEADER_VI: &str = "/**\n\
 * Google Apps Script n\u{00e0}y s\u{1ebd} t\u{1ea1}o m\u{1ed9}t Google Form m\u{1edb}i theo m\u{00f4} t\u{1ea3} c\u{1ee7}a b\u{1ea1}n.\n\
 * C\u{00e1}ch s\u{1eed} d\u{1ee5}ng:\n\
 * 1. M\u{1edf} m\u{1ed9}t Google Sheet ho\u{1eb7}c Google Docs.\n\
 * 2. V\u{00e0}o Ti\u{1ec7}n \u{00ed}ch m\u{1edf} r\u{1ed9}ng > Apps Script.\n\
 * 3. D\u{00e1}n to\u{00e0}n b\u{1ed9} m\u{00e3} n\u{00e0}y v\u{00e0}o tr\u{00ec}nh so\u{1ea1}n th\u{1ea3}o, thay th\u{1ebf} m\u{00e3} hi\u{1ec7}n c\u{00f3}.\n\
 * 4. Nh\u{1ea5}n bi\u{1ec3}u t\u{01b0}\u{1ee3}ng \"L\u{01b0}u d\u{1ef1} \u{00e1}n\".\n\
 * 5. Trong danh s\u{00e1}ch h\u{00e0}m, ch\u{1ecd}n \"createGoogleFormFromAI\" v\u{00e0} nh\u{1ea5}n \"Ch\u{1ea1}y\".\n\
 * 6. B\u{1ea1}n s\u{1ebd} \u{0111}\u{01b0}\u{1ee3}c y\u{00ea}u c\u{1ea7}u c\u{1ea5}p quy\u{1ec1}n. L\u{00e0}m theo h\u{01b0}\u{1edb}ng d\u{1eab}n \u{0111}\u{1ec3} cho ph\u{00e9}p script ch\u{1ea1}y.\n\
 * 7. M\u{1ed9}t Google Form m\u{1edb}i s\u{1ebd} \u{0111}\u{01b0}\u{1ee3}c t\u{1ea1}o trong Google Drive c\u{1ee7}a b\u{1ea1}n.\n\
 */";

const QUIZ_NOTE_EN: &str = "  // NOTE: Score release and answer visibility cannot be set from Apps Script.\n\
  // Open the form's Settings > \"Quiz\" section to adjust them manually.";

const QUIZ_NOTE_VI: &str = "  // L\u{01af}U \u{00dd}: Apps Script kh\u{00f4}ng th\u{1ec3} \u{0111}\u{1eb7}t ch\u{1ebf} \u{0111}\u{1ed9} c\u{00f4}ng b\u{1ed1} \u{0111}i\u{1ec3}m v\u{00e0} hi\u{1ec3}n th\u{1ecb} \u{0111}\u{00e1}p \u{00e1}n.\n\
  // H\u{00e3}y m\u{1edf} C\u{00e0}i \u{0111}\u{1eb7}t > m\u{1ee5}c \"B\u{00e0}i ki\u{1ec3}m tra\" c\u{1ee7}a bi\u{1ec3}u m\u{1eab}u \u{0111}\u{1ec3} ch\u{1ec9}nh th\u{1ee7} c\u{00f4}ng.";

/// Encodes a literal for safe interpolation into the generated script.
///
/// JSON string encoding is a strict subset of JavaScript string syntax, so
/// the emitted literal always parses, whatever the input contains.
fn js_str(s: &str) -> String {
    serde_json::Value::String(s.to_owned()).to_string()
}

/// Returns the constructor call for a question kind.
///
/// Unrecognized kinds fall back to a plain text item so compilation stays
/// total; this mirrors the mutation compiler's fallback arm.
fn constructor_for(kind: QuestionKind) -> &'static str {
    match kind {
        QuestionKind::ShortAnswer | QuestionKind::Unsupported => "form.addTextItem()",
        QuestionKind::Paragraph => "form.addParagraphTextItem()",
        QuestionKind::MultipleChoice => "form.addMultipleChoiceItem()",
        QuestionKind::Checkboxes => "form.addCheckboxItem()",
        QuestionKind::ImageDisplay => "form.addImageItem()",
    }
}

/// A short random suffix keeping per-item variable names unique.
///
/// Purely cosmetic; tests assert on statement structure, never on the
/// generated spelling.
fn var_suffix() -> String {
    Alphanumeric
        .sample_iter(rand::rng())
        .take(7)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

/// Compiles a validated definition into Apps Script source text.
pub fn compile_script(def: &FormDefinition, opts: &ScriptOptions) -> String {
    let mut code = String::with_capacity(4096);

    let (header, quiz_note) = match opts.locale {
        Locale::En => (HEADER_EN, QUIZ_NOTE_EN),
        Locale::Vi => (HEADER_VI, QUIZ_NOTE_VI),
    };
    code.push_str(header);
    code.push_str("\nfunction createGoogleFormFromAI() {\n");
    code.push_str(&format!("  var form = FormApp.create({});\n", js_str(&def.title)));
    if let Some(description) = &def.description {
        code.push_str(&format!("  form.setDescription({});\n", js_str(description)));
    }

    if def.is_quiz {
        code.push_str("  form.setIsQuiz(true);\n");
        if def.quiz_settings.is_some() {
            code.push_str(quiz_note);
            code.push('\n');
        }
    }

    for (si, section) in def.sections.iter().enumerate() {
        code.push_str(&format!(
            "\n  // --- Questions for Section: {} ---\n",
            js_str(&section.title)
        ));

        for question in &section.questions {
            emit_question(&mut code, def, question);
        }

        // Page break opening the next section, skipped after the last one.
        if let Some(next) = def.sections.get(si + 1) {
            code.push_str("\n  // Add page break to start the next section\n");
            code.push_str(&format!("  var pageBreak_{si} = form.addPageBreakItem();\n"));
            code.push_str(&format!(
                "  pageBreak_{si}.setTitle({});\n",
                js_str(&next.title)
            ));
            if let Some(description) = &next.description {
                code.push_str(&format!(
                    "  pageBreak_{si}.setHelpText({});\n",
                    js_str(description)
                ));
            }
        }
    }

    if opts.create_results_sheet {
        code.push_str("\n  // Provision a spreadsheet and collect responses in it\n");
        code.push_str(&format!(
            "  var resultsSheet = SpreadsheetApp.create({});\n",
            js_str(&format!("{} (Responses)", def.title))
        ));
        code.push_str(
            "  form.setDestination(FormApp.DestinationType.SPREADSHEET, resultsSheet.getId());\n",
        );
    }

    code.push_str("\n  Logger.log('Form created successfully!');\n");
    code.push_str("  Logger.log('Published URL: ' + form.getPublishedUrl());\n");
    code.push_str("  Logger.log('Editor URL: ' + form.getEditUrl());\n");
    if opts.create_results_sheet {
        code.push_str("  Logger.log('Results sheet: ' + resultsSheet.getUrl());\n");
    }
    code.push_str("}\n");

    code
}

/// Flattens every JS line terminator so a title stays inside a `//` comment.
///
/// U+2028 and U+2029 end a line in JavaScript source just like `\n` and `\r`.
fn comment_safe(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\n' | '\r' | '\u{2028}' | '\u{2029}' => ' ',
            c => c,
        })
        .collect()
}

fn emit_question(code: &mut String, def: &FormDefinition, question: &Question) {
    let item = format!("item{}", var_suffix());
    code.push_str(&format!(
        "\n  // Question: {}\n",
        comment_safe(&question.title)
    ));
    code.push_str(&format!("  var {item} = {};\n", constructor_for(question.kind)));
    code.push_str(&format!("  {item}.setTitle({});\n", js_str(&question.title)));

    if question.required {
        code.push_str(&format!("  {item}.setRequired(true);\n"));
    }

    // Points only make sense on a graded form, and image items cannot carry
    // them at all. The mutation compiler is deliberately laxer here.
    if def.is_quiz && question.kind != QuestionKind::ImageDisplay {
        if let Some(points) = question.effective_points() {
            code.push_str(&format!("  {item}.setPoints({points});\n"));
        }
    }

    if question.kind.is_choice() && !question.options.is_empty() {
        let choices: Vec<String> = question
            .options
            .iter()
            .map(|option| {
                let is_correct = question.correct_answers.contains(option);
                format!("{item}.createChoice({}, {is_correct})", js_str(option))
            })
            .collect();
        code.push_str(&format!(
            "  {item}.setChoices([\n    {}\n  ]);\n",
            choices.join(",\n    ")
        ));
    }

    // For IMAGE_DISPLAY the image is the item's whole content; for any other
    // kind it is an attachment. Either way a fetch failure must not kill the
    // run, so the block is guarded and degrades to a logged warning (plus a
    // help-text note on answerable questions).
    if let Some(url) = &question.image_url {
        code.push_str("  try {\n");
        code.push_str(&format!("    var imageUrl = {};\n", js_str(url)));
        code.push_str("    var imageBlob = UrlFetchApp.fetch(imageUrl).getBlob();\n");
        code.push_str(&format!("    {item}.setImage(imageBlob);\n"));
        code.push_str("  } catch (e) {\n");
        code.push_str(&format!(
            "    Logger.log('Could not fetch image for question ' + {} + ': ' + e.message);\n",
            js_str(&question.title)
        ));
        if question.kind != QuestionKind::ImageDisplay {
            code.push_str(&format!(
                "    {item}.setHelpText('Error: Could not load image from ' + imageUrl);\n"
            ));
        }
        code.push_str("  }\n");
    }
}
