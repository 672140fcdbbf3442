//! CLI binary for batchdoc.
//!
//! A thin shim over the library crate that maps CLI flags to `BatchConfig`
//! and prints the final tally.

use anyhow::{Context, Result};
use batchdoc::{run, BatchConfig, BatchSummary, PipelineKind};
use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Markdown API docs for every .cpp/.h in src/native/
  batchdoc code --input src/native --output docs/api

  # Hardware YAML sheets for every .pdf in datasheets/
  batchdoc pdf --input datasheets --output db/devices

  # Use a specific model and provider
  batchdoc code --input src --output docs --provider openai --model gpt-4o

  # Machine-readable tally
  batchdoc pdf --input datasheets --output db --json

SUPPORTED PROVIDERS:
  openai (default when OPENAI_API_KEY is set), anthropic, gemini, azure,
  ollama, or any OpenAI-compatible endpoint supported by edgequake-llm.

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY       OpenAI API key
  ANTHROPIC_API_KEY    Anthropic API key
  GEMINI_API_KEY       Google Gemini API key
  BATCHDOC_PROVIDER    Override provider (openai, anthropic, gemini, ollama)
  BATCHDOC_MODEL       Override model ID (default: gpt-4o)

SETUP:
  1. Set API key:     export OPENAI_API_KEY=sk-...
  2. Run a batch:     batchdoc code --input src --output docs

Files whose extraction or completion fails are skipped with a log line;
the batch continues. An unwritable output directory aborts the run.
"#;

/// Batch-generate Markdown API docs and YAML hardware sheets using LLMs.
#[derive(Parser, Debug)]
#[command(
    name = "batchdoc",
    version,
    about = "Batch-generate Markdown API docs and YAML hardware sheets using LLMs",
    long_about = "Walk a directory of C++ sources or PDF datasheets, send each file's text to a \
hosted LLM completion service, and write the response to one .md or .yaml file per input. \
Supports OpenAI, Anthropic, Google Gemini, Azure OpenAI, and Ollama.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate Markdown API documentation from C++ sources (.cpp/.h → .md).
    Code(PipelineArgs),
    /// Extract hardware data from PDF datasheets as YAML (.pdf → .yaml).
    Pdf(PipelineArgs),
}

#[derive(Args, Debug)]
struct PipelineArgs {
    /// Directory containing the input files.
    #[arg(short, long, env = "BATCHDOC_INPUT")]
    input: PathBuf,

    /// Directory receiving the generated files (created if missing).
    #[arg(short, long, env = "BATCHDOC_OUTPUT")]
    output: PathBuf,

    /// LLM model ID (e.g. gpt-4o, claude-sonnet-4-20250514).
    #[arg(long, env = "BATCHDOC_MODEL")]
    model: Option<String>,

    /// LLM provider: openai, anthropic, gemini, ollama, azure.
    /// Auto-detected from API-key env vars if not set.
    #[arg(long, env = "BATCHDOC_PROVIDER")]
    provider: Option<String>,

    /// LLM temperature (0.0–2.0).
    #[arg(long, env = "BATCHDOC_TEMPERATURE", default_value_t = 0.2)]
    temperature: f32,

    /// Max LLM output tokens per file.
    #[arg(long, env = "BATCHDOC_MAX_TOKENS", default_value_t = 4096)]
    max_tokens: usize,

    /// Print the final summary as JSON instead of a text tally.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level logs.
    #[arg(short, long, env = "BATCHDOC_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the final tally.
    #[arg(short, long, env = "BATCHDOC_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (kind, args) = match cli.command {
        Command::Code(args) => (PipelineKind::ApiDocs, args),
        Command::Pdf(args) => (PipelineKind::HardwareSheets, args),
    };

    // ── Logging setup ────────────────────────────────────────────────────
    // Progress lines are the user-facing output of a batch run, so they go
    // to stdout; the JSON summary (when requested) is the only other thing
    // printed there.
    let filter = if quiet_mode(&args) {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .with_writer(io::stdout)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let mut builder = BatchConfig::builder()
        .input_dir(&args.input)
        .output_dir(&args.output)
        .temperature(args.temperature)
        .max_tokens(args.max_tokens);

    if let Some(ref model) = args.model {
        builder = builder.model(model);
    }
    if let Some(ref provider) = args.provider {
        builder = builder.provider_name(provider);
    }

    let config = builder.build().context("Invalid configuration")?;

    // ── Run batch ────────────────────────────────────────────────────────
    let summary = run(kind, &config).await.context("Batch failed")?;

    print_summary(&args, &summary)?;
    Ok(())
}

fn quiet_mode(args: &PipelineArgs) -> bool {
    args.quiet && !args.verbose
}

fn print_summary(args: &PipelineArgs, summary: &BatchSummary) -> Result<()> {
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(summary).context("Failed to serialise summary")?
        );
        return Ok(());
    }

    let mark = if summary.skipped == 0 {
        green("✔")
    } else {
        cyan("⚠")
    };
    println!(
        "{mark} {} file(s) written to {}  ({} skipped of {} matched)",
        bold(&summary.written.to_string()),
        args.output.display(),
        summary.skipped,
        summary.matched,
    );
    Ok(())
}
