/**
 * Text Generation Provider Client
 *
 * Client for an OpenAI-compatible API: chat completions plus the image
 * generation endpoint. The trait exists so the proxy handlers can be
 * tested against a stub generator.
 */

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Failures from the generation provider
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Transport failure or non-success status from the provider
    #[error("request to generation provider failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered but produced no content
    #[error("No response text")]
    EmptyResponse,

    /// The provider answered but produced no image URL
    #[error("No image URL found")]
    EmptyImage,
}

/// Per-endpoint completion tuning
///
/// Each proxy endpoint carries its own token budget and temperature; the
/// defaults match the summary/paragraph settings.
#[derive(Debug, Clone, Copy)]
pub struct Tuning {
    /// Maximum tokens in the completion
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.5,
        }
    }
}

/// A collaborator that turns prompts into generated content
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run a chat completion
    ///
    /// `system` is optional: the free-form run endpoint sends the user
    /// prompt alone, without a system instruction.
    async fn complete(
        &self,
        system: Option<&str>,
        user: &str,
        tuning: Tuning,
    ) -> Result<String, GeneratorError>;

    /// Generate an image and return its URL
    async fn image(&self, prompt: &str) -> Result<String, GeneratorError>;
}

/// OpenAI-compatible client
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";
    const DEFAULT_MODEL: &'static str = "gpt-3.5-turbo";
    const IMAGE_SIZE: &'static str = "512x512";

    /// Create a client against the default provider endpoint
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, Self::DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against a custom endpoint (used by tests and
    /// self-hosted gateways)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: Self::DEFAULT_MODEL.to_string(),
            base_url,
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ImageGeneration {
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    url: Option<String>,
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn complete(
        &self,
        system: Option<&str>,
        user: &str,
        tuning: Tuning,
    ) -> Result<String, GeneratorError> {
        let mut messages = Vec::new();
        if let Some(system) = system {
            messages.push(serde_json::json!({ "role": "system", "content": system }));
        }
        messages.push(serde_json::json!({ "role": "user", "content": user }));

        let body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": tuning.max_tokens,
            "temperature": tuning.temperature,
        });

        let completion = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatCompletion>()
            .await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(GeneratorError::EmptyResponse)
    }

    async fn image(&self, prompt: &str) -> Result<String, GeneratorError> {
        let body = serde_json::json!({
            "prompt": prompt,
            "n": 1,
            "size": Self::IMAGE_SIZE,
        });

        let generation = self
            .http
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<ImageGeneration>()
            .await?;

        generation
            .data
            .into_iter()
            .next()
            .and_then(|datum| datum.url)
            .filter(|url| !url.is_empty())
            .ok_or(GeneratorError::EmptyImage)
    }
}
