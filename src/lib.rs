//! `NomadAI` - Weather-aware travel assistant chat service
//!
//! Forwards user messages to a hosted language model, optionally enriching
//! the prompt with current or forecast weather for a location mentioned in
//! the message.

pub mod api;
pub mod completion;
pub mod config;
pub mod error;
pub mod intent;
pub mod prompt;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::{AppState, ChatRequest, ChatResponse, WeatherPayload};
pub use completion::{CompletionProvider, GroqClient};
pub use config::NomadAiConfig;
pub use error::NomadAiError;
pub use intent::{ExtractedIntent, RequestKind, extract};
pub use prompt::{Language, WEATHER_UNAVAILABLE, assemble};
pub use weather::{WeatherClient, WeatherProvider, WeatherSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, NomadAiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
