//! Weather lookup against the Tomorrow.io v4 API
//!
//! Failures never cross this boundary: any transport error, non-success
//! status, or malformed payload is logged and collapses to `None`, and the
//! chat pipeline continues with the "unavailable" sentinel instead.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::NomadAiError;
use crate::intent::RequestKind;

const TOMORROW_BASE_URL: &str = "https://api.tomorrow.io/v4/weather";
const FORECAST_DAYS: usize = 7;

/// Normalized textual weather summary for one location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherSummary {
    pub location: String,
    pub kind: RequestKind,
    /// Human-readable summary text, ready to embed in a prompt
    pub info: String,
}

/// Seam between the request handler and the concrete weather backend
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch a summary for `location`. Returns `None` on any provider
    /// failure; never errors.
    async fn lookup(&self, location: &str, kind: RequestKind) -> Option<WeatherSummary>;
}

/// Tomorrow.io client sharing one reqwest connection pool across requests
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self::with_base_url(client, api_key, TOMORROW_BASE_URL.to_string())
    }

    pub fn with_base_url(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    async fn fetch(&self, location: &str, kind: RequestKind) -> Result<String, NomadAiError> {
        let endpoint = match kind {
            RequestKind::Realtime => "realtime",
            RequestKind::Forecast => "forecast",
        };
        let url = format!(
            "{}/{}?location={}&apikey={}&units=metric",
            self.base_url,
            endpoint,
            urlencoding::encode(location),
            self.api_key
        );

        debug!("Requesting {} weather for {:?}", endpoint, location);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| NomadAiError::weather(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NomadAiError::weather(format!(
                "provider returned {status}: {body}"
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| NomadAiError::weather(format!("invalid response body: {e}")))?;

        // Some provider errors come back with a success status and an
        // error field in the body.
        if let Some(error) = payload.get("error") {
            return Err(NomadAiError::weather(format!("provider error: {error}")));
        }

        match kind {
            RequestKind::Realtime => {
                let realtime: tomorrow::RealtimeResponse = serde_json::from_value(payload)
                    .map_err(|e| NomadAiError::weather(format!("malformed realtime data: {e}")))?;
                Ok(tomorrow::format_realtime(location, &realtime.data.values))
            }
            RequestKind::Forecast => {
                let forecast: tomorrow::ForecastResponse = serde_json::from_value(payload)
                    .map_err(|e| NomadAiError::weather(format!("malformed forecast data: {e}")))?;
                Ok(tomorrow::format_forecast(
                    location,
                    &forecast.timelines.daily,
                    FORECAST_DAYS,
                ))
            }
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    async fn lookup(&self, location: &str, kind: RequestKind) -> Option<WeatherSummary> {
        match self.fetch(location, kind).await {
            Ok(info) => Some(WeatherSummary {
                location: location.to_string(),
                kind,
                info,
            }),
            Err(e) => {
                warn!("Weather lookup for {:?} degraded: {}", location, e);
                None
            }
        }
    }
}

/// Tomorrow.io API response structures and formatting
mod tomorrow {
    use chrono::{DateTime, Utc};
    use serde::Deserialize;
    use std::fmt::Write;

    #[derive(Debug, Deserialize)]
    pub struct RealtimeResponse {
        pub data: RealtimeData,
    }

    #[derive(Debug, Deserialize)]
    pub struct RealtimeData {
        pub values: RealtimeValues,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RealtimeValues {
        pub temperature: f32,
        pub wind_speed: f32,
        pub humidity: f32,
        #[serde(default)]
        pub precipitation_probability: f32,
        pub weather_code: i64,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub timelines: Timelines,
    }

    #[derive(Debug, Deserialize)]
    pub struct Timelines {
        pub daily: Vec<DailyEntry>,
    }

    #[derive(Debug, Deserialize)]
    pub struct DailyEntry {
        pub time: DateTime<Utc>,
        pub values: DailyValues,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DailyValues {
        pub temperature_avg: f32,
        #[serde(default)]
        pub weather_code_max: i64,
        #[serde(default)]
        pub precipitation_probability_avg: f32,
    }

    /// Convert a Tomorrow.io weather code to a human-readable condition
    #[must_use]
    pub fn weather_code_to_condition(code: i64) -> &'static str {
        match code {
            1000 => "Clear",
            1100 => "Mostly Clear",
            1101 => "Partly Cloudy",
            1102 => "Mostly Cloudy",
            1001 => "Cloudy",
            2000 => "Fog",
            4000 => "Drizzle",
            4001 => "Rain",
            4200 => "Light Rain",
            4201 => "Heavy Rain",
            5000 => "Snow",
            5001 => "Flurries",
            5100 => "Light Snow",
            5101 => "Heavy Snow",
            6000 => "Freezing Drizzle",
            6001 => "Freezing Rain",
            7000 => "Ice Pellets",
            8000 => "Thunderstorm",
            _ => "Unknown",
        }
    }

    /// Render current conditions as summary text
    #[must_use]
    pub fn format_realtime(location: &str, values: &RealtimeValues) -> String {
        format!(
            "Current weather in {location}:\n\
             - Conditions: {}\n\
             - Temperature: {:.1}°C\n\
             - Wind Speed: {:.1} m/s\n\
             - Humidity: {:.0}%\n\
             - Chance of Precipitation: {:.0}%",
            weather_code_to_condition(values.weather_code),
            values.temperature,
            values.wind_speed,
            values.humidity,
            values.precipitation_probability,
        )
    }

    /// Render up to `max_days` daily forecast entries as summary text
    #[must_use]
    pub fn format_forecast(location: &str, daily: &[DailyEntry], max_days: usize) -> String {
        let mut text = format!("Weather forecast for {location}:");
        for day in daily.iter().take(max_days) {
            let _ = write!(
                text,
                "\n{}:\n\
                 - Temperature: {:.1}°C\n\
                 - Conditions: {}\n\
                 - Precipitation Chance: {:.0}%",
                day.time.format("%a, %b %-d"),
                day.values.temperature_avg,
                weather_code_to_condition(day.values.weather_code_max),
                day.values.precipitation_probability_avg,
            );
        }
        text
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_uses_default_base_url() {
        let client = WeatherClient::new(Client::new(), "key12345".to_string());
        assert_eq!(client.base_url, TOMORROW_BASE_URL);
    }
}
