//! # batchdoc
//!
//! Batch-generate documentation and structured data from local files using
//! hosted LLM completion services.
//!
//! ## Why this crate?
//!
//! Writing API documentation for a directory of C++ sources, or transcribing
//! hardware datasheets into machine-readable YAML, is mechanical work a
//! completion model does well. This crate wraps that delegation in a small,
//! predictable batch loop: one input file in, one request out, one output
//! file written — with per-file skip-on-error semantics so a single bad
//! input never aborts the run.
//!
//! ## Pipeline Overview
//!
//! ```text
//! input dir
//!  │
//!  ├─ 1. Enumerate  list the directory, sort, filter by extension
//!  ├─ 2. Extract    read source text, or per-page PDF text via lopdf
//!  ├─ 3. Generate   one chat-completion call per file (gpt-4o / claude / …)
//!  └─ 4. Write      <output_dir>/<basename>.{md,yaml}, dirs created as needed
//! ```
//!
//! Two pipelines share this loop and differ only in extraction and prompt:
//!
//! | Pipeline | Input | Instruction | Output |
//! |----------|-------|-------------|--------|
//! | [`PipelineKind::ApiDocs`] | `.cpp` / `.h` | Markdown API documentation | `.md` |
//! | [`PipelineKind::HardwareSheets`] | `.pdf` | hardware data as YAML | `.yaml` |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use batchdoc::{run, BatchConfig, PipelineKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Provider auto-detected from OPENAI_API_KEY / ANTHROPIC_API_KEY / …
//!     let config = BatchConfig::builder()
//!         .input_dir("src/native")
//!         .output_dir("docs/api")
//!         .build()?;
//!     let summary = run(PipelineKind::ApiDocs, &config).await?;
//!     eprintln!("{} written, {} skipped", summary.written, summary.skipped);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `batchdoc` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! batchdoc = { version = "0.2", default-features = false }
//! ```
//!
//! ## Failure model
//!
//! Extraction and completion failures are local to one file: the driver logs
//! them and moves on ([`FileError`]). Output-write failures abort the batch
//! ([`BatchError`]) — an unwritable output directory is a configuration
//! problem, not a bad input. The returned [`BatchSummary`] tallies both
//! outcomes.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod batch;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod prompts;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use batch::{run, run_batch, BatchSummary};
pub use config::{BatchConfig, BatchConfigBuilder, PipelineKind};
pub use error::{BatchError, FileError};
pub use pipeline::generate::{Completion, LlmClient};
