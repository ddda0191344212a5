//! Intent extraction from raw chat messages
//!
//! Decides whether a message is asking about weather, and if so where and
//! for what window (current conditions vs multi-day forecast). Pure text
//! analysis, no I/O.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

/// What kind of weather data the user is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Realtime,
    Forecast,
}

/// Result of analyzing a chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedIntent {
    /// Cleaned location string, if the message mentioned one
    pub location: Option<String>,
    pub kind: RequestKind,
}

/// Location patterns, tried in priority order. The first match wins and its
/// single capture group is the location candidate.
static LOCATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(?:weather|forecast|temperature|current)\s+(?:in|for|at)\s+([A-Za-z\s,]+)",
        r"(?i)how(?:'s| is) the weather in\s+([A-Za-z\s,]+)",
        r"(?i)what(?:'s| is) the weather like in\s+([A-Za-z\s,]+)",
        r"(?i)(?:visit|traveling to|going to)\s+([A-Za-z\s,]+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("invalid location pattern"))
    .collect()
});

/// Time words that leak into the captured location ("weather in Paris
/// tomorrow") and must not reach the weather provider as part of the query.
static LOCATION_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(today|tomorrow|this week|next week|forecast|weather)\b")
        .expect("invalid noise pattern")
});

const FORECAST_KEYWORDS: [&str; 4] = ["forecast", "this week", "next week", "tomorrow"];

/// Analyze a chat message for a weather request.
///
/// The kind is derived from forecast keywords anywhere in the message; the
/// location is the first capture of the first matching pattern, stripped of
/// noise words and trimmed. A location that is empty after cleanup counts
/// as no location.
pub fn extract(message: &str) -> ExtractedIntent {
    let normalized = message.trim().to_lowercase();
    let kind = if FORECAST_KEYWORDS
        .iter()
        .any(|keyword| normalized.contains(keyword))
    {
        RequestKind::Forecast
    } else {
        RequestKind::Realtime
    };

    for pattern in LOCATION_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(message) {
            let location = clean_location(&captures[1]);
            if location.is_empty() {
                break;
            }
            debug!("Extracted location {:?} ({:?})", location, kind);
            return ExtractedIntent {
                location: Some(location),
                kind,
            };
        }
    }

    debug!("No location found in message");
    ExtractedIntent {
        location: None,
        kind,
    }
}

/// Strip time/noise words from a captured location and normalize whitespace
fn clean_location(raw: &str) -> String {
    let stripped = LOCATION_NOISE.replace_all(raw, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("What's the weather in Paris?", Some("Paris"), RequestKind::Realtime)]
    #[case("weather forecast for London", Some("London"), RequestKind::Forecast)]
    #[case("What is the temperature at Rome", Some("Rome"), RequestKind::Realtime)]
    #[case("How's the weather in New York?", Some("New York"), RequestKind::Realtime)]
    #[case(
        "What's the weather like in Paris tomorrow?",
        Some("Paris"),
        RequestKind::Forecast
    )]
    #[case("I'm going to Tokyo next week", Some("Tokyo"), RequestKind::Forecast)]
    #[case("I want to visit Barcelona, Spain", Some("Barcelona, Spain"), RequestKind::Realtime)]
    #[case("hi", None, RequestKind::Realtime)]
    #[case("tell me a joke", None, RequestKind::Realtime)]
    #[case("what happens tomorrow", None, RequestKind::Forecast)]
    fn test_extract(
        #[case] message: &str,
        #[case] location: Option<&str>,
        #[case] kind: RequestKind,
    ) {
        let intent = extract(message);
        assert_eq!(intent.location.as_deref(), location);
        assert_eq!(intent.kind, kind);
    }

    #[test]
    fn test_first_pattern_wins() {
        // Both the "weather in" and the "going to" patterns could match;
        // the earlier pattern takes priority.
        let intent = extract("weather in Oslo before going to Bergen");
        assert_eq!(intent.location.as_deref(), Some("Oslo before going to Bergen"));
    }

    #[test]
    fn test_capture_stops_at_punctuation() {
        let intent = extract("weather in Paris? thanks");
        assert_eq!(intent.location.as_deref(), Some("Paris"));
    }

    #[rstest]
    #[case("Paris tomorrow", "Paris")]
    #[case("  Berlin  ", "Berlin")]
    #[case("London this week", "London")]
    #[case("tomorrow", "")]
    #[case("Weatherford", "Weatherford")]
    fn test_clean_location(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(clean_location(raw), expected);
    }

    #[test]
    fn test_location_empty_after_cleanup_is_none() {
        // "weather for tomorrow" matches pattern 1 with capture "tomorrow",
        // which is pure noise.
        let intent = extract("weather for tomorrow");
        assert_eq!(intent.location, None);
        assert_eq!(intent.kind, RequestKind::Forecast);
    }

    #[test]
    fn test_forecast_keywords_case_insensitive() {
        assert_eq!(extract("FORECAST for Madrid").kind, RequestKind::Forecast);
        assert_eq!(extract("weather in Madrid Next Week").kind, RequestKind::Forecast);
    }
}
