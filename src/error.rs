//! Error types for the batchdoc library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`BatchError`] — **Fatal**: the batch cannot proceed at all (missing
//!   input directory, unwritable output, provider not configured). Returned
//!   as `Err(BatchError)` from [`crate::batch::run_batch`].
//!
//! * [`FileError`] — **Non-fatal**: a single input file failed (unreadable
//!   source, corrupt PDF, completion call error) while the rest of the batch
//!   is fine. The driver logs it, counts a skip, and moves to the next file.
//!
//! The separation keeps the skip decision in one place: stages return
//! `Result<_, FileError>` and the driver decides what a skip means, rather
//! than each stage signalling failure through a sentinel value.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the batchdoc library.
///
/// Per-file failures use [`FileError`] and are logged rather than
/// propagated here.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Input directory was not found at the given path.
    #[error("input directory not found: '{path}'\nCheck the path exists and is readable.")]
    InputDirNotFound { path: PathBuf },

    /// Input directory exists but could not be enumerated.
    #[error("failed to read input directory '{path}': {source}")]
    ReadInputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create the output directory (or a parent of an output file).
    #[error("failed to create output directory '{path}': {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not write an output file. Batch-fatal: an unwritable output
    /// location is a configuration problem, not a property of one input.
    #[error("failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured provider is not initialised (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal error for a single input file.
///
/// The driver logs the error, skips the file, and continues with the rest
/// of the batch. No output file is produced for a skipped input.
#[derive(Debug, Error)]
pub enum FileError {
    /// Reading a source file failed (missing, permission, not valid UTF-8).
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The PDF could not be opened or parsed at all.
    #[error("failed to parse PDF '{path}': {detail}")]
    PdfParse { path: PathBuf, detail: String },

    /// The completion call failed (transport or service error).
    #[error("completion request failed: {detail}")]
    Completion { detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_dir_not_found_display() {
        let e = BatchError::InputDirNotFound {
            path: PathBuf::from("/no/such/dir"),
        };
        assert!(e.to_string().contains("/no/such/dir"));
    }

    #[test]
    fn output_write_carries_source() {
        use std::error::Error as _;
        let e = BatchError::OutputWrite {
            path: PathBuf::from("out/foo.md"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("out/foo.md"));
        assert!(e.source().is_some());
    }

    #[test]
    fn completion_error_display() {
        let e = FileError::Completion {
            detail: "HTTP 503 from provider".into(),
        };
        assert!(e.to_string().contains("503"));
    }

    #[test]
    fn pdf_parse_display_names_file() {
        let e = FileError::PdfParse {
            path: PathBuf::from("broken.pdf"),
            detail: "invalid xref table".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("broken.pdf"), "got: {msg}");
        assert!(msg.contains("xref"), "got: {msg}");
    }
}
