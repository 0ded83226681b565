use std::time::Duration;

use serde_json::{json, Value};

use super::{AiResponse, TextGenerator};
use crate::config::AppConfig;
use crate::error::GenerateError;

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Result<Self, GenerateError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.gemini_timeout_secs))
            .build()?;

        Ok(GeminiClient {
            http,
            api_key: config.api_key().map(str::to_string),
            model: config.gemini_model.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            max_tokens: config.gemini_max_tokens,
            temperature: config.gemini_temperature,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn request_body(&self, prompt: &str) -> Value {
        let mut body = json!({
            "contents": [{"parts": [{"text": prompt}]}]
        });

        let mut generation = serde_json::Map::new();
        if let Some(max) = self.max_tokens {
            generation.insert("maxOutputTokens".into(), json!(max));
        }
        if let Some(t) = self.temperature {
            generation.insert("temperature".into(), json!(t));
        }
        if !generation.is_empty() {
            body["generationConfig"] = Value::Object(generation);
        }
        body
    }
}

#[rocket::async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<AiResponse, GenerateError> {
        let api_key = self.api_key.as_deref().ok_or(GenerateError::NotConfigured)?;

        // Key travels in a header so it never shows up in URLs or access logs.
        let resp = self
            .http
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            log::warn!("Gemini returned {}: {}", status, body);
            return Err(GenerateError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let raw = resp.text().await?;
        let json: Value = serde_json::from_str(&raw)?;
        let text = extract_text(&json).ok_or(GenerateError::NoCandidates)?;

        Ok(AiResponse {
            text,
            provider: "gemini".into(),
            model: self.model.clone(),
        })
    }

    fn provider(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// `candidates[0].content.parts[0].text`, or `None` when any step is missing.
pub fn extract_text(json: &Value) -> Option<String> {
    json.get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(|t| t.as_str())
        .map(|t| t.to_string())
}
