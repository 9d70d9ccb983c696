//! Session parameters.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{ParleyError, Result};

/// Models the client may send requests to.
pub const SUPPORTED_MODELS: &[&str] = &["gpt-4o-mini", "gpt-4o"];

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 512;

pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const MAX_OUTPUT_TOKENS_RANGE: RangeInclusive<u32> = 32..=2048;

/// Mutable, process-local settings of one chat session.
///
/// Fields are private so every change goes through a validating setter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionParameters {
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl Default for SessionParameters {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

impl SessionParameters {
    /// Builds validated parameters.
    pub fn new(model: &str, temperature: f32, max_output_tokens: u32) -> Result<Self> {
        let mut params = Self::default();
        params.set_model(model)?;
        params.set_temperature(temperature)?;
        params.set_max_output_tokens(max_output_tokens)?;
        Ok(params)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    pub fn set_model(&mut self, model: &str) -> Result<()> {
        if !SUPPORTED_MODELS.contains(&model) {
            return Err(ParleyError::invalid_parameter(
                "model",
                format!(
                    "'{model}' is not supported (choose one of: {})",
                    SUPPORTED_MODELS.join(", ")
                ),
            ));
        }
        self.model = model.to_string();
        Ok(())
    }

    pub fn set_temperature(&mut self, temperature: f32) -> Result<()> {
        // NaN fails `contains`, so it is rejected here too.
        if !TEMPERATURE_RANGE.contains(&temperature) {
            return Err(ParleyError::invalid_parameter(
                "temperature",
                format!(
                    "{temperature} is outside {}..={}",
                    TEMPERATURE_RANGE.start(),
                    TEMPERATURE_RANGE.end()
                ),
            ));
        }
        self.temperature = temperature;
        Ok(())
    }

    pub fn set_max_output_tokens(&mut self, max_output_tokens: u32) -> Result<()> {
        if !MAX_OUTPUT_TOKENS_RANGE.contains(&max_output_tokens) {
            return Err(ParleyError::invalid_parameter(
                "max_output_tokens",
                format!(
                    "{max_output_tokens} is outside {}..={}",
                    MAX_OUTPUT_TOKENS_RANGE.start(),
                    MAX_OUTPUT_TOKENS_RANGE.end()
                ),
            ));
        }
        self.max_output_tokens = max_output_tokens;
        Ok(())
    }
}
