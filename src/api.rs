//! Chat endpoint: request/response contract and pipeline orchestration

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::NomadAiError;
use crate::completion::CompletionProvider;
use crate::intent::{self, RequestKind};
use crate::prompt::{self, Language};
use crate::weather::WeatherProvider;

/// Provider clients shared by all requests, constructed once at startup
#[derive(Clone)]
pub struct AppState {
    pub weather: Arc<dyn WeatherProvider>,
    pub completion: Arc<dyn CompletionProvider>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    /// Language code; anything other than "es" or "it" means English
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
    #[serde(rename = "weatherData")]
    pub weather_data: Option<WeatherPayload>,
}

/// Weather block echoed back to the widget alongside the generated reply
#[derive(Debug, Serialize)]
pub struct WeatherPayload {
    pub location: String,
    pub info: String,
    #[serde(rename = "type")]
    pub kind: RequestKind,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .with_state(state)
}

/// Run one chat request through the pipeline:
/// validate, extract intent, fetch weather when a location was mentioned,
/// assemble the prompt, call the completion provider.
///
/// A failed weather lookup degrades to the "unavailable" sentinel and the
/// request continues; a failed completion call aborts with a 500.
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, NomadAiError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(NomadAiError::validation("Message is required"));
    }

    let intent = intent::extract(message);

    let weather = match &intent.location {
        Some(location) => state.weather.lookup(location, intent.kind).await,
        None => {
            debug!("No location in message, skipping weather lookup");
            None
        }
    };

    let language = Language::from_code(&request.language);
    let prompt_text = prompt::assemble(
        language,
        message,
        weather.as_ref().map(|summary| summary.info.as_str()),
    );

    let reply = state.completion.complete(&prompt_text).await?;

    Ok(Json(ChatResponse {
        message: reply,
        weather_data: weather.map(|summary| WeatherPayload {
            location: summary.location,
            info: summary.info,
            kind: summary.kind,
        }),
    }))
}
