//! Completion: submit one prompt to the provider and return its text.
//!
//! This module is intentionally thin — all instruction text lives in
//! [`crate::prompts`] so it can be changed without touching transport or
//! error handling here. One request goes out per input file; the first
//! completion's text comes back verbatim. There is no retry, no backoff,
//! and no application-level timeout: a failed call surfaces as a
//! [`FileError::Completion`] and the driver skips the file.
//!
//! The [`Completion`] trait is the seam between the driver and the network:
//! production code uses [`LlmClient`] (an `edgequake-llm` provider handle
//! constructed once per batch run), tests substitute a canned
//! implementation.

use crate::config::BatchConfig;
use crate::error::{BatchError, FileError};
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider, ProviderFactory};
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// Model used when the caller names a provider but no model.
const DEFAULT_MODEL: &str = "gpt-4o";

/// One prompt in, one completion out.
///
/// Implementations must be usable behind a shared reference: the driver
/// constructs a single client per batch run and borrows it for every file.
pub trait Completion: Send + Sync {
    /// Submit one prompt and return the model's completion text.
    fn complete(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, FileError>> + Send;
}

/// Production [`Completion`] backed by an `edgequake-llm` provider.
///
/// Holds the provider handle plus the sampling settings that are identical
/// for every request in a run. Cloning is cheap (the provider is an `Arc`).
#[derive(Clone)]
pub struct LlmClient {
    provider: Arc<dyn LLMProvider>,
    temperature: f32,
    max_tokens: usize,
}

impl LlmClient {
    /// Build a client from explicit parts.
    pub fn new(provider: Arc<dyn LLMProvider>, temperature: f32, max_tokens: usize) -> Self {
        Self {
            provider,
            temperature,
            max_tokens,
        }
    }

    /// Resolve the provider from the configuration, most-specific first.
    ///
    /// 1. **Pre-built provider** (`config.provider`) — the caller constructed
    ///    and configured the provider entirely; used as-is. Useful in tests
    ///    or when the caller needs custom middleware.
    /// 2. **Named provider + model** (`config.provider_name`) — resolved via
    ///    [`ProviderFactory::create_llm_provider`], which reads the matching
    ///    API-key environment variable (`OPENAI_API_KEY`, etc.).
    /// 3. **`OPENAI_API_KEY` present** — prefer OpenAI explicitly, so users
    ///    with several provider keys get a stable default.
    /// 4. **Full auto-detection** ([`ProviderFactory::from_env`]) — the
    ///    factory scans all known API-key variables and picks the first
    ///    available provider.
    ///
    /// Credentials are never read from the configuration itself; they come
    /// from the environment of the provider that is selected.
    pub fn from_config(config: &BatchConfig) -> Result<Self, BatchError> {
        let provider = resolve_provider(config)?;
        Ok(Self::new(provider, config.temperature, config.max_tokens))
    }
}

impl Completion for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, FileError> {
        let messages = vec![ChatMessage::user(prompt)];
        let options = build_options(self.temperature, self.max_tokens);

        match self.provider.chat(&messages, Some(&options)).await {
            Ok(response) => {
                debug!(
                    "completion: {} input tokens, {} output tokens",
                    response.prompt_tokens, response.completion_tokens
                );
                Ok(response.content)
            }
            Err(e) => Err(FileError::Completion {
                detail: e.to_string(),
            }),
        }
    }
}

/// Build `CompletionOptions` for one request.
fn build_options(temperature: f32, max_tokens: usize) -> CompletionOptions {
    CompletionOptions {
        temperature: Some(temperature),
        max_tokens: Some(max_tokens),
        ..Default::default()
    }
}

fn resolve_provider(config: &BatchConfig) -> Result<Arc<dyn LLMProvider>, BatchError> {
    // 1) User-provided provider takes priority
    if let Some(ref provider) = config.provider {
        return Ok(Arc::clone(provider));
    }

    // 2) Provider name + model
    if let Some(ref name) = config.provider_name {
        let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);
        return create_provider(name, model);
    }

    // 3) Prefer OpenAI when its key is present
    if let Ok(openai_key) = std::env::var("OPENAI_API_KEY") {
        if !openai_key.is_empty() {
            let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);
            return create_provider("openai", model);
        }
    }

    // 4) Auto-detect from environment
    let (llm_provider, _embedding) =
        ProviderFactory::from_env().map_err(|e| BatchError::ProviderNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set OPENAI_API_KEY, ANTHROPIC_API_KEY, or pass --provider.\n\
                Error: {}",
                e
            ),
        })?;

    Ok(llm_provider)
}

fn create_provider(name: &str, model: &str) -> Result<Arc<dyn LLMProvider>, BatchError> {
    ProviderFactory::create_llm_provider(name, model).map_err(|e| {
        BatchError::ProviderNotConfigured {
            provider: name.to_string(),
            hint: format!("{e}"),
        }
    })
}
