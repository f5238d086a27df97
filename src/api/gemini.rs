use crate::error::{Result, StudioError};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Client for the generative-language API. One logical operation: send an
/// instruction plus a user turn, get back a text payload expected to be JSON.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            client,
        }
    }

    /// Points the client at an alternative endpoint. Used by tests to target
    /// a local mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Issues one generation request and returns the raw text payload.
    ///
    /// `response_schema`, when present, is passed through as a formal output
    /// schema so the model emits conforming JSON instead of free-form text.
    pub async fn generate_content(
        &self,
        system_instruction: &str,
        user_text: &str,
        response_schema: Option<Value>,
        temperature: f64,
    ) -> Result<String> {
        let mut generation_config = json!({
            "temperature": temperature,
            "responseMimeType": "application/json",
        });
        if let Some(schema) = response_schema {
            generation_config["responseSchema"] = schema;
        }

        let request_body = json!({
            "system_instruction": {
                "parts": [{ "text": system_instruction }]
            },
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": user_text }]
                }
            ],
            "generationConfig": generation_config,
        });

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        debug!("Sending generation request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(StudioError::Api(format!(
                "Generation API error: {}",
                error_text
            )));
        }

        let response_json: GenerateContentResponse = response.json().await?;
        let text = response_json
            .candidates
            .and_then(|mut c| c.drain(..).next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|mut p| p.drain(..).next())
            .and_then(|p| p.text)
            .ok_or_else(|| {
                StudioError::Api("No generated text in API response".to_string())
            })?;

        if text.trim().is_empty() {
            return Err(StudioError::EmptyResponse);
        }

        info!("Received {} characters of generated text", text.len());
        Ok(text)
    }
}

/// Strips a wrapping markdown code fence from a model reply. Older models
/// fence their JSON even when asked for a raw object.
pub fn strip_code_fence(text: &str) -> &str {
    text.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fence() {
        let fenced = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fence(fenced), "{\"a\": 1}");
    }

    #[test]
    fn strips_bare_fence() {
        let fenced = "```\n[1, 2]\n```";
        assert_eq!(strip_code_fence(fenced), "[1, 2]");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
    }
}
