//! Writer: persist one completion to disk.
//!
//! The generated text is written as-is — no trailing-newline normalisation,
//! no atomic replace, no validity check even when the pipeline nominally
//! expects YAML. An existing file at the target path is overwritten
//! silently; re-running a batch over unchanged inputs reproduces the same
//! outputs in place.
//!
//! Write failures are the one batch-fatal stage error: they map to
//! [`BatchError::OutputWrite`] (or [`BatchError::CreateOutputDir`]) and
//! propagate out of the driver.

use crate::error::BatchError;
use std::fs;
use std::path::Path;
use tracing::info;

/// Write `text` verbatim to `path`, creating parent directories if absent.
///
/// Logs the output path on success.
pub fn write_output(text: &str, path: &Path) -> Result<(), BatchError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| BatchError::CreateOutputDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, text).map_err(|source| BatchError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_text_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("widget.md");

        write_output("# Widget\n\nNo trailing newline here", &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "# Widget\n\nNo trailing newline here");
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/board.yaml");

        write_output("device: board\n", &path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("widget.md");

        write_output("first", &path).unwrap();
        write_output("second", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn unwritable_target_is_output_write_error() {
        let dir = tempfile::tempdir().unwrap();
        // The target's "parent" is a regular file, so create_dir_all fails.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not dir").unwrap();
        let path = blocker.join("widget.md");

        let result = write_output("content", &path);
        assert!(matches!(
            result,
            Err(BatchError::CreateOutputDir { .. }) | Err(BatchError::OutputWrite { .. })
        ));
    }
}
