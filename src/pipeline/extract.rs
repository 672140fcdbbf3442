//! Extraction: turn one input file into a plain-text blob.
//!
//! The source variant is a full-file read. The document variant walks the
//! PDF page by page with `lopdf` and joins the page texts with a newline,
//! so downstream stages see one string regardless of input shape.
//!
//! Failure policy: an input that cannot be read or parsed at all yields a
//! [`FileError`] and the driver skips that file. A single page whose text
//! extraction fails inside an otherwise readable PDF is skipped with a
//! warning and the remaining pages are kept (best effort, scoped to that
//! one page).

use crate::config::PipelineKind;
use crate::error::FileError;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Extract the text of `path` according to the pipeline kind.
pub fn extract(kind: PipelineKind, path: &Path) -> Result<String, FileError> {
    match kind {
        PipelineKind::ApiDocs => read_source(path),
        PipelineKind::HardwareSheets => extract_sheet_text(path),
    }
}

/// Read a source file's full textual content.
pub fn read_source(path: &Path) -> Result<String, FileError> {
    fs::read_to_string(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Extract a PDF's text, page by page, joined with `"\n"`.
///
/// Pages are visited in document order. Each page's text is trimmed of
/// trailing whitespace before joining, so a two-page document with page
/// texts "A" and "B" extracts to `"A\nB"`.
pub fn extract_sheet_text(path: &Path) -> Result<String, FileError> {
    let doc = lopdf::Document::load(path).map_err(|e| FileError::PdfParse {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    let mut pages: Vec<String> = Vec::new();
    for (page_num, _object_id) in doc.get_pages() {
        match doc.extract_text(&[page_num]) {
            Ok(text) => pages.push(text.trim_end().to_string()),
            Err(e) => {
                warn!("{}: page {} text extraction failed: {}", path.display(), page_num, e);
            }
        }
    }

    debug!("{}: extracted {} page(s)", path.display(), pages.len());
    Ok(pages.join("\n"))
}
