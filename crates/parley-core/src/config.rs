//! Configuration models.
//!
//! `AppConfig` is read from `config.toml`; `SecretConfig` from `secret.json`.
//! Every field has a default so a missing or partial file is valid.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogKind, CatalogSource};
use crate::error::Result;
use crate::session::{
    DEFAULT_BASE_INSTRUCTION, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    SessionParameters,
};

/// Application configuration (`config.toml`).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding one `<name>.md` file per persona
    pub personas_dir: String,
    /// Instruction placed at the start of every system message
    pub base_instruction: String,
    pub catalogs: CatalogConfig,
    pub defaults: DefaultsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            personas_dir: "personas".to_string(),
            base_instruction: DEFAULT_BASE_INSTRUCTION.to_string(),
            catalogs: CatalogConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    pub general_url: String,
    pub jailbreak_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            general_url: CatalogKind::General.default_url().to_string(),
            jailbreak_url: CatalogKind::Jailbreak.default_url().to_string(),
        }
    }
}

impl CatalogConfig {
    pub fn source(&self, kind: CatalogKind) -> CatalogSource {
        match kind {
            CatalogKind::General => CatalogSource::new(kind, self.general_url.clone()),
            CatalogKind::Jailbreak => CatalogSource::new(kind, self.jailbreak_url.clone()),
        }
    }
}

/// Initial session parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DefaultsConfig {
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

impl DefaultsConfig {
    /// Validates the configured defaults into session parameters.
    pub fn to_parameters(&self) -> Result<SessionParameters> {
        SessionParameters::new(&self.model, self.temperature, self.max_output_tokens)
    }
}

/// Secret configuration (`secret.json`).
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai: Option<OpenAIConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

impl SecretConfig {
    /// The stored OpenAI key, if present and not blank.
    pub fn openai_api_key(&self) -> Option<&str> {
        self.openai
            .as_ref()
            .map(|c| c.api_key.trim())
            .filter(|key| !key.is_empty())
    }
}
