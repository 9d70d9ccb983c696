//! API key resolution.
//!
//! Order: `--api-key` / `OPENAI_API_KEY`, then secret.json, then an
//! interactive prompt. The first non-blank value wins.

use parley_core::config::SecretConfig;
use parley_core::error::{ParleyError, Result};

/// Where the resolved key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Argument,
    SecretFile,
    Prompt,
}

pub fn resolve_api_key(
    argument: Option<&str>,
    secret: Option<&SecretConfig>,
    prompt: impl FnOnce() -> Option<String>,
) -> Result<(String, KeySource)> {
    fn non_blank(value: &str) -> Option<String> {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    if let Some(key) = argument.and_then(non_blank) {
        return Ok((key, KeySource::Argument));
    }

    if let Some(key) = secret.and_then(SecretConfig::openai_api_key).and_then(non_blank) {
        return Ok((key, KeySource::SecretFile));
    }

    if let Some(key) = prompt().as_deref().and_then(non_blank) {
        return Ok((key, KeySource::Prompt));
    }

    Err(ParleyError::MissingCredential(
        "Please provide a valid OpenAI API key (--api-key, OPENAI_API_KEY or secret.json)".into(),
    ))
}
