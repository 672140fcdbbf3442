//! Pipeline stages for batch document generation.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. a different PDF backend, a mock completion
//! client in tests) without touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! extract ──▶ generate ──▶ write
//! (fs/lopdf)  (LLM chat)   (fs)
//! ```
//!
//! 1. [`extract`]  — turn one input file into a plain-text blob: a straight
//!    UTF-8 read for sources, per-page text extraction for PDFs
//! 2. [`generate`] — submit one prompt to the completion provider and return
//!    the completion text; the only stage with network I/O
//! 3. [`write`]    — persist the completion verbatim under the output
//!    directory, creating parents as needed

pub mod extract;
pub mod generate;
pub mod write;
