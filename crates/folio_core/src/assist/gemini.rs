//! Gemini `generateContent` client.
//!
//! # Invariants
//! - Without an API key no request is sent.
//! - Transport, status and decode failures all collapse to
//!   `GENERATION_ERROR_MESSAGE`; details go to the log only.

use super::TextGenerator;
use log::{error, info};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Returned when no credential is configured.
pub const MISSING_API_KEY_MESSAGE: &str = "API Key is missing. Please configure the environment.";
/// Returned when the model answers without text.
pub const EMPTY_RESPONSE_MESSAGE: &str = "Could not generate content.";
/// Returned when the call fails.
pub const GENERATION_ERROR_MESSAGE: &str = "Error generating content. Please try again.";

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Environment variable holding the credential.
pub const API_KEY_ENV: &str = "API_KEY";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the Gemini API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl GeminiConfig {
    /// Default settings with the credential read from `API_KEY`.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok(),
            ..Self::default()
        }
    }

    fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Builds the model prompt for one task.
pub fn build_prompt(task: &str, context: &str) -> String {
    format!(
        "Context: {context}\n\nTask: {task}\n\nKeep it professional, concise, and engaging for a portfolio website."
    )
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Subset of the `generateContent` response this client reads.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate, if non-empty.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// HTTP-backed `TextGenerator`.
pub struct GeminiGenerator {
    config: GeminiConfig,
    client: Client,
}

impl GeminiGenerator {
    pub fn new(config: GeminiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn request(&self, api_key: &str, prompt: &str) -> Result<GenerateResponse, reqwest::Error> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        );
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };
        self.client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()?
            .error_for_status()?
            .json::<GenerateResponse>()
    }
}

impl TextGenerator for GeminiGenerator {
    fn generate(&self, task: &str, context: &str) -> String {
        let Some(api_key) = self.config.usable_api_key() else {
            info!("event=assist_generate module=assist status=skipped reason=missing_api_key");
            return MISSING_API_KEY_MESSAGE.to_string();
        };

        let started_at = Instant::now();
        let prompt = build_prompt(task, context);
        match self.request(api_key, &prompt) {
            Ok(response) => {
                info!(
                    "event=assist_generate module=assist status=ok model={} duration_ms={}",
                    self.config.model,
                    started_at.elapsed().as_millis()
                );
                response
                    .text()
                    .unwrap_or_else(|| EMPTY_RESPONSE_MESSAGE.to_string())
            }
            Err(err) => {
                error!(
                    "event=assist_generate module=assist status=error model={} duration_ms={} error={err}",
                    self.config.model,
                    started_at.elapsed().as_millis()
                );
                GENERATION_ERROR_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        build_prompt, GeminiConfig, GeminiGenerator, GenerateResponse, MISSING_API_KEY_MESSAGE,
    };
    use crate::assist::TextGenerator;

    #[test]
    fn missing_or_blank_key_short_circuits() {
        for api_key in [None, Some("   ".to_string())] {
            let generator = GeminiGenerator::new(GeminiConfig {
                api_key,
                // Unroutable endpoint: reaching the network would fail the assertion.
                endpoint: "http://127.0.0.1:9".to_string(),
                ..GeminiConfig::default()
            })
            .expect("client builds");
            assert_eq!(generator.generate("bio", "ctx"), MISSING_API_KEY_MESSAGE);
        }
    }

    #[test]
    fn prompt_places_context_before_task() {
        let prompt = build_prompt("Write a bio", "Alex, developer");
        assert!(prompt.starts_with("Context: Alex, developer\n\nTask: Write a bio"));
        assert!(prompt.ends_with("engaging for a portfolio website."));
    }

    #[test]
    fn response_text_joins_first_candidate_parts() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hello "},{"text":"world"}]}},
                {"content":{"parts":[{"text":"ignored"}]}}]}"#,
        )
        .expect("decode");
        assert_eq!(response.text().as_deref(), Some("Hello world"));
    }

    #[test]
    fn empty_response_has_no_text() {
        let response: GenerateResponse = serde_json::from_str("{}").expect("decode");
        assert_eq!(response.text(), None);
    }
}
