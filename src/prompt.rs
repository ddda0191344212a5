//! Prompt assembly for the completion provider
//!
//! The instruction text is built from an ordered sequence of literal and
//! variable segments instead of token search-and-replace, so user content
//! containing a placeholder-looking string can never disturb the template.

/// Response language directive resolved from the request's language code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Spanish,
    Italian,
}

impl Language {
    /// Resolve a language code. Unrecognized codes fall back to English;
    /// this is a deliberate permissive default, not an error.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "es" => Language::Spanish,
            "it" => Language::Italian,
            _ => Language::English,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::Italian => "Italian",
        }
    }
}

/// Sentinel embedded in the prompt when no weather data could be fetched.
/// Distinguishable from real provider output so the model can mention the
/// gap instead of presenting fabricated conditions.
pub const WEATHER_UNAVAILABLE: &str = "Weather data is currently unavailable.";

const PERSONA: &str = "\
You are a friendly and knowledgeable travel assistant, knowing all the secret places of the world.
Your responses should include:
1. Travel recommendations and hidden gems.
2. Weather information only if the user explicitly asks for it.
3. Practical travel tips based on the user's questions.

If the user greets you (e.g., \"hi\", \"hello\"), respond with a short and friendly offer to help, without mentioning weather or travel tips.

If the user requests weather information, incorporate it naturally into your response. If no weather data is available, still provide travel information but mention that weather data couldn't be fetched.
";

/// Build the full instruction text for one request
#[must_use]
pub fn assemble(language: Language, user_message: &str, weather_info: Option<&str>) -> String {
    let weather_block = weather_info.unwrap_or(WEATHER_UNAVAILABLE);

    let mut prompt = String::with_capacity(
        PERSONA.len() + weather_block.len() + user_message.len() + 64,
    );
    prompt.push_str(PERSONA);
    prompt.push_str("\nRespond in ");
    prompt.push_str(language.name());
    prompt.push_str(".\n\nWeather Info: ");
    prompt.push_str(weather_block);
    prompt.push_str("\nUser Question: ");
    prompt.push_str(user_message);
    prompt
}
