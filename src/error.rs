//! Error types and handling for the `NomadAI` service

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Main error type for the `NomadAI` service
#[derive(Error, Debug)]
pub enum NomadAiError {
    /// Configuration-related errors (missing or malformed credentials)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Weather provider errors; recoverable, the pipeline degrades instead
    /// of surfacing these to the caller
    #[error("Weather provider error: {message}")]
    Weather { message: String },

    /// Completion provider errors; fatal to the request
    #[error("Completion provider error: {message}")]
    Completion { message: String },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl NomadAiError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new weather provider error
    pub fn weather<S: Into<String>>(message: S) -> Self {
        Self::Weather {
            message: message.into(),
        }
    }

    /// Create a new completion provider error
    pub fn completion<S: Into<String>>(message: S) -> Self {
        Self::Completion {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// HTTP status this error maps to at the API boundary
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            NomadAiError::Validation { .. } => StatusCode::BAD_REQUEST,
            NomadAiError::Config { .. }
            | NomadAiError::Weather { .. }
            | NomadAiError::Completion { .. }
            | NomadAiError::General { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short message suitable for the `error` field of the JSON body
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            NomadAiError::Config { .. } => "Service is not configured".to_string(),
            NomadAiError::Validation { message } => message.clone(),
            NomadAiError::Weather { .. }
            | NomadAiError::Completion { .. }
            | NomadAiError::General { .. } => "Failed to process request".to_string(),
        }
    }

    /// Diagnostic detail for the optional `details` field. Validation
    /// failures carry everything in `error` already.
    #[must_use]
    pub fn details(&self) -> Option<String> {
        match self {
            NomadAiError::Validation { .. } => None,
            NomadAiError::Config { message }
            | NomadAiError::Weather { message }
            | NomadAiError::Completion { message }
            | NomadAiError::General { message } => Some(message.clone()),
        }
    }
}

impl IntoResponse for NomadAiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = match self.details() {
            Some(details) => json!({ "error": self.user_message(), "details": details }),
            None => json!({ "error": self.user_message() }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = NomadAiError::config("missing API key");
        assert!(matches!(config_err, NomadAiError::Config { .. }));

        let validation_err = NomadAiError::validation("Message is required");
        assert!(matches!(validation_err, NomadAiError::Validation { .. }));

        let completion_err = NomadAiError::completion("connection refused");
        assert!(matches!(completion_err, NomadAiError::Completion { .. }));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            NomadAiError::validation("Message is required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            NomadAiError::completion("timeout").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            NomadAiError::config("no key").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_has_no_details() {
        let err = NomadAiError::validation("Message is required");
        assert_eq!(err.user_message(), "Message is required");
        assert!(err.details().is_none());
    }

    #[test]
    fn test_completion_details_carry_diagnostics() {
        let err = NomadAiError::completion("Groq API returned 503");
        assert_eq!(err.user_message(), "Failed to process request");
        assert_eq!(err.details(), Some("Groq API returned 503".to_string()));
    }
}
