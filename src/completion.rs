//! Chat completion client for Groq's OpenAI-compatible API

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::NomadAiError;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.7;

/// Returned instead of an empty completion so the widget never renders an
/// empty bubble
pub const EMPTY_RESPONSE_FALLBACK: &str = "Sorry, I couldn't generate a response.";

/// Seam between the request handler and the concrete completion backend
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a reply for the assembled prompt. Provider failures are
    /// fatal to the request and surface as errors.
    async fn complete(&self, prompt: &str) -> Result<String, NomadAiError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<RequestMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Groq client sharing one reqwest connection pool across requests
pub struct GroqClient {
    client: Client,
    api_key: String,
    model: String,
    api_url: String,
}

impl GroqClient {
    pub fn new(client: Client, api_key: String, model: String) -> Self {
        Self::with_api_url(client, api_key, model, GROQ_API_URL.to_string())
    }

    pub fn with_api_url(client: Client, api_key: String, model: String, api_url: String) -> Self {
        Self {
            client,
            api_key,
            model,
            api_url,
        }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionProvider for GroqClient {
    async fn complete(&self, prompt: &str) -> Result<String, NomadAiError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![RequestMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        debug!("Requesting completion from model {}", self.model);

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| NomadAiError::completion(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NomadAiError::completion(format!(
                "provider returned {status}: {body}"
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| NomadAiError::completion(format!("invalid response body: {e}")))?;

        Ok(generated_text(completion))
    }
}

/// Pull the generated text out of a completion response, substituting the
/// fallback for an empty or absent message
fn generated_text(response: ChatCompletionResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.is_empty())
        .unwrap_or_else(|| EMPTY_RESPONSE_FALLBACK.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: serde_json::Value) -> ChatCompletionResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_generated_text_happy_path() {
        let response = parse(serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Visit the old town." } }
            ]
        }));
        assert_eq!(generated_text(response), "Visit the old town.");
    }

    #[test]
    fn test_generated_text_first_choice_wins() {
        let response = parse(serde_json::json!({
            "choices": [
                { "message": { "content": "first" } },
                { "message": { "content": "second" } }
            ]
        }));
        assert_eq!(generated_text(response), "first");
    }

    #[test]
    fn test_empty_content_falls_back() {
        let response = parse(serde_json::json!({
            "choices": [ { "message": { "content": "" } } ]
        }));
        assert_eq!(generated_text(response), EMPTY_RESPONSE_FALLBACK);
    }

    #[test]
    fn test_missing_content_falls_back() {
        let response = parse(serde_json::json!({
            "choices": [ { "message": {} } ]
        }));
        assert_eq!(generated_text(response), EMPTY_RESPONSE_FALLBACK);
    }

    #[test]
    fn test_no_choices_falls_back() {
        let response = parse(serde_json::json!({ "choices": [] }));
        assert_eq!(generated_text(response), EMPTY_RESPONSE_FALLBACK);
    }

    #[test]
    fn test_request_body_shape() {
        let request = ChatCompletionRequest {
            model: "mixtral-8x7b-32768",
            messages: vec![RequestMessage {
                role: "user",
                content: "hello",
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["model"], "mixtral-8x7b-32768");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["max_tokens"], 500);
        let temperature = body["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
    }
}
