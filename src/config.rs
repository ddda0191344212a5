//! Configuration management for the `NomadAI` service
//!
//! All settings come from environment variables (optionally loaded from a
//! `.env` file at startup). Provider credentials are validated up front so
//! that a missing key fails loudly at boot instead of surfacing as a
//! confusing provider error on the first request.

use crate::NomadAiError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Root configuration for the `NomadAI` service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NomadAiConfig {
    /// Groq API key (`GROQ_API_KEY`)
    pub groq_api_key: String,
    /// Tomorrow.io API key (`WEATHER_API_KEY`)
    pub weather_api_key: String,
    /// Completion model identifier (`NOMADAI_MODEL`)
    #[serde(default = "default_model")]
    pub model: String,
    /// HTTP listen port (`NOMADAI_PORT`)
    #[serde(default = "default_port")]
    pub port: u16,
    /// Timeout for outbound provider requests in seconds
    /// (`NOMADAI_HTTP_TIMEOUT_SECS`)
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

fn default_model() -> String {
    "mixtral-8x7b-32768".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_http_timeout() -> u64 {
    10
}

impl NomadAiConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self> {
        let groq_api_key = env::var("GROQ_API_KEY").map_err(|_| {
            NomadAiError::config("GROQ_API_KEY is not set. Add it to your environment or .env file.")
        })?;

        let weather_api_key = env::var("WEATHER_API_KEY").map_err(|_| {
            NomadAiError::config(
                "WEATHER_API_KEY is not set. Add it to your environment or .env file.",
            )
        })?;

        let model = env::var("NOMADAI_MODEL").unwrap_or_else(|_| default_model());

        let port = match env::var("NOMADAI_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| NomadAiError::config(format!("Invalid NOMADAI_PORT value: {raw}")))?,
            Err(_) => default_port(),
        };

        let http_timeout_secs = match env::var("NOMADAI_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                NomadAiError::config(format!("Invalid NOMADAI_HTTP_TIMEOUT_SECS value: {raw}"))
            })?,
            Err(_) => default_http_timeout(),
        };

        let config = Self {
            groq_api_key,
            weather_api_key,
            model,
            port,
            http_timeout_secs,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        if self.groq_api_key.is_empty() {
            return Err(NomadAiError::config("GROQ_API_KEY cannot be empty").into());
        }

        if self.weather_api_key.is_empty() {
            return Err(NomadAiError::config("WEATHER_API_KEY cannot be empty").into());
        }

        if self.weather_api_key.len() < 8 {
            return Err(NomadAiError::config(
                "WEATHER_API_KEY appears to be invalid (too short). Please check your API key.",
            )
            .into());
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.http_timeout_secs == 0 {
            return Err(NomadAiError::config("HTTP timeout must be at least 1 second").into());
        }

        if self.http_timeout_secs > 300 {
            return Err(NomadAiError::config("HTTP timeout cannot exceed 300 seconds").into());
        }

        if self.model.is_empty() {
            return Err(NomadAiError::config("Model identifier cannot be empty").into());
        }

        Ok(())
    }
}
