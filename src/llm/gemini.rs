//! Gemini LLM provider implementation.

use std::time::Duration;

use super::provider::{CompletionOptions, LlmError, LlmProvider, ModelInfo};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{DEFAULT_MODEL_TIMEOUT_SECS, GeminiSettings};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini LLM provider.
///
/// Uses the `models/{model}:generateContent` REST endpoint of the Generative
/// Language API, authenticated with an API key header.
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    ///
    /// # Arguments
    /// * `base_url` - API base (e.g., "https://generativelanguage.googleapis.com/v1beta").
    /// * `api_key` - Generative Language API key.
    /// * `model` - Model to use (e.g., "gemini-2.5-flash").
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            timeout: Duration::from_secs(DEFAULT_MODEL_TIMEOUT_SECS),
        }
    }

    pub fn from_settings(settings: &GeminiSettings) -> Self {
        Self::new(&settings.api_url, &settings.api_key, &settings.model)
            .with_timeout(settings.timeout)
    }

    /// Per-request timeout for model listing. Completions take theirs from
    /// [`CompletionOptions`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Model names come back as "models/xyz"; the path wants them once.
    fn model_path(&self) -> &str {
        self.model.strip_prefix("models/").unwrap_or(&self.model)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String, LlmError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model_path());

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: Some(GenerationConfig {
                temperature: Some(options.temperature),
                max_output_tokens: options.max_tokens,
            }),
        };

        debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            "Sending completion request to Gemini"
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .timeout(options.timeout)
            .send()
            .await?;

        let response = check_status(response).await?;

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            LlmError::InvalidResponse(format!("Failed to parse Gemini response: {}", e))
        })?;

        let Some(candidate) = body.candidates.into_iter().next() else {
            let reason = body
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates returned".to_string());
            return Err(LlmError::InvalidResponse(reason));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        debug!(
            finish_reason = ?candidate.finish_reason,
            text_len = text.len(),
            "Received completion response from Gemini"
        );

        if text.trim().is_empty() {
            return Err(LlmError::InvalidResponse(format!(
                "empty completion (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text)
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, LlmError> {
        let url = format!("{}/models", self.base_url);
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(&url)
                .header(API_KEY_HEADER, &self.api_key)
                .timeout(self.timeout);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let response = check_status(request.send().await?).await?;
            let page: ListModelsResponse = response.json().await.map_err(|e| {
                LlmError::InvalidResponse(format!("Failed to parse models response: {}", e))
            })?;

            models.extend(page.models.into_iter().map(|m| ModelInfo {
                name: m.name,
                display_name: m.display_name.unwrap_or_default(),
                description: m.description.unwrap_or_default(),
                supported_methods: m.supported_generation_methods,
            }));

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(models)
    }
}

async fn check_status(response: Response) -> Result<Response, LlmError> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(LlmError::RateLimited);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(LlmError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    Ok(response)
}

/// Pulls `error.message` out of a Google API error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

// Gemini API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<GeminiModel>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiModel {
    name: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}
