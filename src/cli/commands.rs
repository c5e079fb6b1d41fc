//! CLI command definitions for formforge.
//!
//! The pipeline splits into four commands so each stage can be scripted on
//! its own: `generate` (raw text -> definition JSON via the LLM), `validate`
//! (structural check), `script` (definition -> Apps Script text), and
//! `create` (definition -> remote Google Form).

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::compile::{compile_script, Locale, ScriptOptions};
use crate::forms::{FormOrchestrator, GoogleFormsClient, StaticToken};
use crate::generate::DefinitionGenerator;
use crate::llm::GeminiClient;
use crate::model::FormDefinition;
use crate::validate::validate;

/// AI-assisted Google Forms generator.
#[derive(Parser)]
#[command(name = "formforge")]
#[command(about = "Generate Google Forms from plain text, as API mutations or Apps Script")]
#[command(version)]
#[command(
    long_about = "formforge turns plain text (markdown outlines, pasted questionnaires, Forms API JSON) into a normalized form definition, then compiles it either into a batch of Forms API mutations applied directly to your account, or into a standalone Apps Script you can run yourself.\n\nExample usage:\n  formforge generate -i survey.md -o survey.json\n  formforge script -d survey.json --results-sheet\n  formforge create -d survey.json"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Generate a form definition from raw text using the LLM.
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Validate a form definition file.
    Validate(ValidateArgs),

    /// Compile a form definition into a standalone Apps Script.
    Script(ScriptArgs),

    /// Create the form in your Google account via the Forms API.
    Create(CreateArgs),
}

/// Arguments for `formforge generate`.
#[derive(Parser)]
pub struct GenerateArgs {
    /// Input file with the raw content ("-" for stdin).
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// Language of the generation instructions.
    #[arg(long, value_enum, default_value_t = Locale::En)]
    pub language: Locale,

    /// Gemini API key.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Model identifier to use.
    #[arg(long, default_value = crate::llm::gemini::DEFAULT_MODEL)]
    pub model: String,

    /// Where to write the definition JSON (stdout if omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `formforge validate`.
#[derive(Parser)]
pub struct ValidateArgs {
    /// Form definition JSON file.
    #[arg(short, long)]
    pub definition: PathBuf,
}

/// Arguments for `formforge script`.
#[derive(Parser)]
pub struct ScriptArgs {
    /// Form definition JSON file.
    #[arg(short, long)]
    pub definition: PathBuf,

    /// Language of the instruction comments in the emitted script.
    #[arg(long, value_enum, default_value_t = Locale::En)]
    pub locale: Locale,

    /// Also provision a results spreadsheet bound to the form.
    #[arg(long)]
    pub results_sheet: bool,

    /// Where to write the script (stdout if omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `formforge create`.
#[derive(Parser)]
pub struct CreateArgs {
    /// Form definition JSON file.
    #[arg(short, long)]
    pub definition: PathBuf,

    /// OAuth bearer token with the forms.body scope.
    #[arg(long, env = "GOOGLE_OAUTH_TOKEN", hide_env_values = true)]
    pub token: String,
}

/// Parses the CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Runs the command selected by the parsed arguments.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate(args) => run_generate(args).await,
        Commands::Validate(args) => run_validate(args),
        Commands::Script(args) => run_script(args),
        Commands::Create(args) => run_create(args).await,
    }
}

fn read_input(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("reading stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(source).with_context(|| format!("reading {source}"))
    }
}

fn load_definition(path: &Path) -> anyhow::Result<FormDefinition> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let def: FormDefinition =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    validate(def).context("definition failed validation")
}

fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => println!("{content}"),
    }
    Ok(())
}

async fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let raw = read_input(&args.input)?;
    let client = GeminiClient::new(args.api_key).with_model(args.model);
    let generator = DefinitionGenerator::new(Arc::new(client));

    let definition = generator.generate_definition(&raw, args.language).await?;
    let definition = validate(definition).context("generated definition failed validation")?;

    let json = serde_json::to_string_pretty(&definition)?;
    write_output(args.output.as_deref(), &json)
}

fn run_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let def = load_definition(&args.definition)?;
    println!(
        "OK: \"{}\" with {} section(s), {} question(s){}",
        def.title,
        def.sections.len(),
        def.question_count(),
        if def.is_quiz { ", quiz" } else { "" }
    );
    Ok(())
}

fn run_script(args: ScriptArgs) -> anyhow::Result<()> {
    let def = load_definition(&args.definition)?;
    let script = compile_script(
        &def,
        &ScriptOptions {
            locale: args.locale,
            create_results_sheet: args.results_sheet,
        },
    );
    write_output(args.output.as_deref(), &script)
}

async fn run_create(args: CreateArgs) -> anyhow::Result<()> {
    let def = load_definition(&args.definition)?;
    let orchestrator = FormOrchestrator::new(
        Arc::new(StaticToken::new(args.token)),
        Arc::new(GoogleFormsClient::new()),
    );
    let created = orchestrator.create_remote_form(&def).await?;
    println!("Form created.");
    println!("Share URL: {}", created.share_url);
    println!("Edit URL:  {}", created.edit_url);
    Ok(())
}
