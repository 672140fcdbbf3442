//! Instruction templates sent to the completion service.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — changing what we ask the model for
//!    requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect the built prompt directly
//!    without a live provider, so a prompt regression is caught the same
//!    way a code regression is.
//!
//! The instruction text is the only difference between the two pipelines;
//! everything else in the batch loop is shared.

use crate::config::PipelineKind;

/// Instruction prefix for the code pipeline.
pub const API_DOCS_INSTRUCTION: &str =
    "Generate detailed API documentation in Markdown format for the following C++ code:";

/// Instruction prefix for the datasheet pipeline.
///
/// The model is asked for YAML; the response is written to disk verbatim,
/// without a validity check.
pub const HARDWARE_SHEET_INSTRUCTION: &str =
    "Extract structured hardware data from the following content and format it as YAML:";

/// Build the single request prompt for one input file.
///
/// The extracted text is embedded after the pipeline's instruction,
/// separated by a blank line. Constructed fresh per call, never cached.
pub fn build_prompt(kind: PipelineKind, extracted: &str) -> String {
    let instruction = match kind {
        PipelineKind::ApiDocs => API_DOCS_INSTRUCTION,
        PipelineKind::HardwareSheets => HARDWARE_SHEET_INSTRUCTION,
    };
    format!("{instruction}\n\n{extracted}")
}
