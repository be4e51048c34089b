//! OpenAI-compatible chat client for the AI helper endpoints.
//!
//! Models routinely wrap JSON in markdown fences or drift from the requested
//! shape, so parsing is lenient: strict `serde_json` first, then regex field
//! extraction over the raw text.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use singleaudio_core::forecast::RevenueForecast;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-4o-mini";

/// Track metadata produced by the generate-metadata helper.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrackMetadata {
    pub title: String,
    pub genre: String,
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Thin chat-completions client. Constructed only when an API key is set.
#[derive(Debug, Clone)]
pub struct AiClient {
    http: reqwest::Client,
    api_key: String,
}

impl AiClient {
    /// Build a client from server config. `None` when no API key is set.
    pub fn from_config(config: &ServerConfig) -> Option<Self> {
        config.openai_api_key.as_ref().map(|key| Self {
            http: reqwest::Client::new(),
            api_key: key.clone(),
        })
    }

    /// Send one system + user message pair and return the assistant's text.
    pub async fn chat(&self, system: &str, user: &str) -> AppResult<String> {
        let body = json!({
            "model": MODEL,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "temperature": 0.7,
        });

        let response = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ServiceUnavailable(format!("AI request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(%status, "AI API returned an error status");
            return Err(AppError::ServiceUnavailable(format!(
                "AI API returned {status}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::ServiceUnavailable(format!("AI response unreadable: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::ServiceUnavailable("AI response had no choices".into()))
    }
}

/// Strip a leading/trailing markdown code fence, if present.
fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence.
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    rest.trim_end_matches("```").trim()
}

/// Extract a double-quoted string field from loose JSON-ish text.
fn extract_string_field(raw: &str, field: &str) -> Option<String> {
    let pattern = format!(r#""{field}"\s*:\s*"([^"]*)""#);
    let re = Regex::new(&pattern).ok()?;
    re.captures(raw).map(|c| c[1].to_string())
}

/// Extract a numeric field from loose JSON-ish text.
fn extract_number_field(raw: &str, field: &str) -> Option<f64> {
    let pattern = format!(r#""{field}"\s*:\s*([0-9]+(?:\.[0-9]+)?)"#);
    let re = Regex::new(&pattern).ok()?;
    re.captures(raw).and_then(|c| c[1].parse().ok())
}

/// Parse the metadata answer: strict JSON first, regex extraction second.
pub fn parse_metadata(raw: &str) -> TrackMetadata {
    let cleaned = strip_fences(raw);
    if let Ok(metadata) = serde_json::from_str::<TrackMetadata>(cleaned) {
        return metadata;
    }

    let tags = Regex::new(r#""tags"\s*:\s*\[([^\]]*)\]"#)
        .ok()
        .and_then(|re| re.captures(cleaned).map(|c| c[1].to_string()))
        .map(|inner| {
            inner
                .split(',')
                .map(|t| t.trim().trim_matches('"').to_string())
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default();

    TrackMetadata {
        title: extract_string_field(cleaned, "title").unwrap_or_default(),
        genre: extract_string_field(cleaned, "genre").unwrap_or_default(),
        description: extract_string_field(cleaned, "description").unwrap_or_default(),
        tags,
    }
}

/// Parse the revenue-forecast answer. `None` means the caller should fall
/// back to the deterministic estimate.
pub fn parse_forecast(raw: &str) -> Option<RevenueForecast> {
    let cleaned = strip_fences(raw);

    let revenue = extract_number_field(cleaned, "estimated_monthly_revenue")?;
    let confidence = extract_number_field(cleaned, "confidence_level")
        .map(|c| c.clamp(0.0, 100.0) as u8)
        .unwrap_or(50);

    let factors = Regex::new(r#""factors"\s*:\s*\[([^\]]*)\]"#)
        .ok()
        .and_then(|re| re.captures(cleaned).map(|c| c[1].to_string()))
        .map(|inner| {
            inner
                .split(',')
                .map(|f| f.trim().trim_matches('"').to_string())
                .filter(|f| !f.is_empty())
                .collect()
        })
        .unwrap_or_default();

    Some(RevenueForecast {
        estimated_monthly_revenue: revenue,
        confidence_level: confidence,
        factors,
        best_release_time: extract_string_field(cleaned, "best_release_time"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clean_json_metadata() {
        let raw = r#"{"title":"Night Drive","genre":"electronic","description":"Moody synths","tags":["synthwave","night"]}"#;
        let metadata = parse_metadata(raw);
        assert_eq!(metadata.title, "Night Drive");
        assert_eq!(metadata.tags, vec!["synthwave", "night"]);
    }

    #[test]
    fn parses_fenced_json_metadata() {
        let raw = "```json\n{\"title\":\"Fenced\",\"genre\":\"pop\",\"description\":\"x\",\"tags\":[]}\n```";
        let metadata = parse_metadata(raw);
        assert_eq!(metadata.title, "Fenced");
        assert_eq!(metadata.genre, "pop");
    }

    #[test]
    fn falls_back_to_regex_on_chatty_answer() {
        let raw = r#"Sure! Here you go: "title": "Loose", "genre": "rock", "tags": ["a", "b"] hope that helps"#;
        let metadata = parse_metadata(raw);
        assert_eq!(metadata.title, "Loose");
        assert_eq!(metadata.genre, "rock");
        assert_eq!(metadata.tags, vec!["a", "b"]);
    }

    #[test]
    fn forecast_requires_a_revenue_number() {
        assert!(parse_forecast("no numbers here").is_none());

        let raw = r#"{"estimated_monthly_revenue": 42.5, "confidence_level": 80, "factors": ["genre"]}"#;
        let forecast = parse_forecast(raw).unwrap();
        assert_eq!(forecast.estimated_monthly_revenue, 42.5);
        assert_eq!(forecast.confidence_level, 80);
        assert_eq!(forecast.factors, vec!["genre"]);
    }
}
