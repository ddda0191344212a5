use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use nomadai::api::AppState;
use nomadai::completion::GroqClient;
use nomadai::config::NomadAiConfig;
use nomadai::weather::WeatherClient;
use nomadai::web;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = NomadAiConfig::load().context("Failed to load configuration")?;
    tracing::info!("Using completion model: {}", config.model);

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    let state = AppState {
        weather: Arc::new(WeatherClient::new(
            http_client.clone(),
            config.weather_api_key.clone(),
        )),
        completion: Arc::new(GroqClient::new(
            http_client,
            config.groq_api_key.clone(),
            config.model.clone(),
        )),
    };

    web::run(state, config.port).await
}
