//! Configuration types for batch document generation.
//!
//! All batch behaviour is controlled through [`BatchConfig`], built via its
//! [`BatchConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to pass the same settings to both pipelines and to diff two runs to
//! understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! The struct will keep growing (provider handles, sampling knobs); the
//! builder lets callers set only what they care about and rely on documented
//! defaults for the rest.

use crate::error::BatchError;
use edgequake_llm::LLMProvider;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Which of the two batch pipelines to run.
///
/// The pipelines share the enumerate → extract → generate → write loop and
/// differ only in which files they pick up, which instruction they send to
/// the model, and which extension the output carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineKind {
    /// C++ sources (`.cpp`, `.h`) → Markdown API documentation (`.md`).
    ApiDocs,
    /// PDF datasheets (`.pdf`) → structured hardware data as YAML (`.yaml`).
    HardwareSheets,
}

impl PipelineKind {
    /// Input extensions this pipeline picks up (lower-case, without dot).
    pub fn input_extensions(&self) -> &'static [&'static str] {
        match self {
            PipelineKind::ApiDocs => &["cpp", "h"],
            PipelineKind::HardwareSheets => &["pdf"],
        }
    }

    /// Extension of the files this pipeline writes (without dot).
    pub fn output_extension(&self) -> &'static str {
        match self {
            PipelineKind::ApiDocs => "md",
            PipelineKind::HardwareSheets => "yaml",
        }
    }

    /// Whether `path` is an input file for this pipeline.
    ///
    /// Extension comparison is ASCII case-insensitive, so `FOO.CPP` and
    /// `sheet.PDF` are picked up. Files without an extension never match.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.input_extensions()
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false)
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineKind::ApiDocs => write!(f, "api-docs"),
            PipelineKind::HardwareSheets => write!(f, "hardware-sheets"),
        }
    }
}

/// Configuration for one batch run.
///
/// Built via [`BatchConfig::builder()`].
///
/// # Example
/// ```rust
/// use batchdoc::BatchConfig;
///
/// let config = BatchConfig::builder()
///     .input_dir("datasheets")
///     .output_dir("out")
///     .model("gpt-4o")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct BatchConfig {
    /// Directory whose entries are enumerated and filtered by extension.
    pub input_dir: PathBuf,

    /// Directory receiving one output file per processed input.
    /// Created (with parents) if absent.
    pub output_dir: PathBuf,

    /// LLM model identifier, e.g. "gpt-4o", "claude-sonnet-4-20250514".
    /// If None, the provider default (`gpt-4o` for OpenAI) is used.
    pub model: Option<String>,

    /// LLM provider name (e.g. "openai", "anthropic", "ollama").
    /// If None along with `provider`, the provider is auto-detected from
    /// API-key environment variables.
    pub provider_name: Option<String>,

    /// Pre-constructed LLM provider. Takes precedence over `provider_name`.
    pub provider: Option<Arc<dyn LLMProvider>>,

    /// Sampling temperature for the completion. Default: 0.2.
    ///
    /// Low temperature keeps the model close to the input — the right
    /// setting when the task is describing code or transcribing a datasheet
    /// rather than writing prose.
    pub temperature: f32,

    /// Maximum tokens the model may generate per file. Default: 4096.
    ///
    /// A large header or a dense datasheet can exceed 2 000 output tokens;
    /// setting this too low silently truncates the response mid-sentence.
    pub max_tokens: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("out"),
            model: None,
            provider_name: None,
            provider: None,
            temperature: 0.2,
            max_tokens: 4096,
        }
    }
}

impl fmt::Debug for BatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchConfig")
            .field("input_dir", &self.input_dir)
            .field("output_dir", &self.output_dir)
            .field("model", &self.model)
            .field("provider_name", &self.provider_name)
            .field("provider", &self.provider.as_ref().map(|_| "<dyn LLMProvider>"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl BatchConfig {
    /// Create a new builder for `BatchConfig`.
    pub fn builder() -> BatchConfigBuilder {
        BatchConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`BatchConfig`].
#[derive(Debug)]
pub struct BatchConfigBuilder {
    config: BatchConfig,
}

impl BatchConfigBuilder {
    pub fn input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.input_dir = dir.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<BatchConfig, BatchError> {
        let c = &self.config;
        if c.input_dir.as_os_str().is_empty() {
            return Err(BatchError::InvalidConfig(
                "input directory must not be empty".into(),
            ));
        }
        if c.output_dir.as_os_str().is_empty() {
            return Err(BatchError::InvalidConfig(
                "output directory must not be empty".into(),
            ));
        }
        if c.max_tokens == 0 {
            return Err(BatchError::InvalidConfig(
                "max_tokens must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}
