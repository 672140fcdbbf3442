//! The batch driver: enumerate, then extract → generate → write per file.
//!
//! ## Control flow
//!
//! The driver is a straight-line sequential loop — one file is fully
//! processed before the next begins, and the completion call is awaited
//! inline with no spawned tasks. There are exactly two skip points:
//! extraction failure and completion failure. Both are logged and counted;
//! neither aborts the batch. A write failure does abort, because an
//! unwritable output directory would fail every remaining file the same
//! way.
//!
//! ## Ordering
//!
//! `read_dir` yields entries in an order that differs across platforms and
//! filesystems, so the listing is sorted before processing. Outputs and log
//! lines are therefore deterministic for a given input directory.

use crate::config::{BatchConfig, PipelineKind};
use crate::error::BatchError;
use crate::pipeline::generate::{Completion, LlmClient};
use crate::pipeline::{extract, write};
use crate::prompts;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome tally for one batch run.
///
/// `matched` counts every input file the pipeline recognised; each of them
/// ends up either in `written` or in `skipped`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Input files matching the pipeline's extensions.
    pub matched: usize,
    /// Output files written.
    pub written: usize,
    /// Inputs skipped after an extraction or completion failure.
    pub skipped: usize,
}

/// Run a batch with a provider resolved from the configuration.
///
/// This is the primary entry point for the library: it constructs the
/// [`LlmClient`] once and reuses it for every file in the run.
///
/// # Errors
/// Returns `Err(BatchError)` only for fatal conditions: missing input
/// directory, provider not configured, unwritable output. Per-file
/// failures are logged and reflected in the summary instead.
pub async fn run(kind: PipelineKind, config: &BatchConfig) -> Result<BatchSummary, BatchError> {
    let client = LlmClient::from_config(config)?;
    run_batch(kind, config, &client).await
}

/// Run a batch against an explicit completion client.
///
/// Split from [`run`] so callers (and tests) can substitute their own
/// [`Completion`] implementation; the client is borrowed, never rebuilt
/// per file.
pub async fn run_batch<C: Completion>(
    kind: PipelineKind,
    config: &BatchConfig,
    client: &C,
) -> Result<BatchSummary, BatchError> {
    if !config.input_dir.is_dir() {
        return Err(BatchError::InputDirNotFound {
            path: config.input_dir.clone(),
        });
    }

    fs::create_dir_all(&config.output_dir).map_err(|source| BatchError::CreateOutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let inputs = list_inputs(kind, &config.input_dir)?;
    info!(
        "Running {} pipeline over {} ({} matching file(s))",
        kind,
        config.input_dir.display(),
        inputs.len()
    );

    let mut summary = BatchSummary {
        matched: inputs.len(),
        ..BatchSummary::default()
    };

    for path in &inputs {
        info!("Processing {}...", path.display());

        let extracted = match extract::extract(kind, path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                summary.skipped += 1;
                continue;
            }
        };

        let prompt = prompts::build_prompt(kind, &extracted);
        let generated = match client.complete(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                summary.skipped += 1;
                continue;
            }
        };

        let out_path = output_path(kind, &config.output_dir, path);
        write::write_output(&generated, &out_path)?;
        summary.written += 1;
    }

    info!(
        "Batch complete: {} written, {} skipped (of {} matched)",
        summary.written, summary.skipped, summary.matched
    );
    Ok(summary)
}

/// List the regular files in `input_dir` that `kind` recognises, sorted.
///
/// Entries with unrecognised extensions are ignored entirely — no log line,
/// no tally entry. Subdirectories are never descended into.
fn list_inputs(kind: PipelineKind, input_dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let entries = fs::read_dir(input_dir).map_err(|source| BatchError::ReadInputDir {
        path: input_dir.to_path_buf(),
        source,
    })?;

    let mut inputs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && kind.matches(path))
        .collect();

    inputs.sort();
    Ok(inputs)
}

/// Derive the output path: `<output_dir>/<input basename>.<pipeline ext>`.
fn output_path(kind: PipelineKind, output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    output_dir
        .join(stem)
        .with_extension(kind.output_extension())
}
