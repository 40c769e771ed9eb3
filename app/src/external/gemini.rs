//! Gemini Client
//!
//! Client for the Google generative language `generateContent` endpoint.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::AssistantConfig;
use crate::error::{AppError, AppResult};
use crate::services::LanguageModel;

/// Client for the generative language API
#[derive(Clone)]
pub struct GeminiClient {
    api_endpoint: String,
    api_key: String,
    model: String,
    thinking_budget: u32,
    http_client: Client,
}

/// Request body of `generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    pub thinking_budget: u32,
}

/// Response of `generateContent`
#[derive(Debug, Deserialize, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, joined
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

impl GeminiClient {
    /// Create a new client
    pub fn new(config: &AssistantConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            thinking_budget: config.thinking_budget,
            http_client,
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_endpoint, self.model)
    }

    /// Send a prompt and return the raw response
    pub async fn generate_content(&self, prompt: &str) -> AppResult<GenerateContentResponse> {
        if self.api_key.is_empty() {
            return Err(AppError::Configuration(
                "assistant.api_key is not set".to_string(),
            ));
        }

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig {
                    thinking_budget: self.thinking_budget,
                },
            },
        };

        let response = self
            .http_client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Assistant(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Assistant(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Assistant(format!("Failed to parse response: {}", e)))
    }
}

impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        Ok(self.generate_content(prompt).await?.text())
    }
}
