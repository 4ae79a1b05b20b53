//! Anthropic Messages API client.
//!
//! Implements [`TextGenerator`] over `POST /v1/messages` using
//! [`reqwest`]. The base URL is injectable so tests can point the client
//! at a local mock server.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::generator::{GenerationRequest, ProviderError, TextGenerator};

/// Production endpoint for the Anthropic API.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Model every generation stage runs against unless overridden.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";

/// Value of the mandatory `anthropic-version` request header.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// HTTP client for the Anthropic Messages endpoint.
pub struct AnthropicClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: [MessageParam<'a>; 1],
}

#[derive(Serialize)]
struct MessageParam<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<Usage>,
}

/// One entry of the response `content` array. Non-text block types
/// deserialize with an empty `text` and are skipped during assembly.
#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

impl AnthropicClient {
    /// Create a client against the production Anthropic endpoint.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), api_key)
    }

    /// Create a client against a custom base URL.
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the model identifier sent with every request.
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ProviderError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    /// Send one `POST /v1/messages` call and return the concatenation of
    /// all text blocks in the response.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            system: request.system.as_deref(),
            messages: [MessageParam {
                role: "user",
                content: &request.prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let message: MessagesResponse = response.json().await?;

        if let Some(usage) = &message.usage {
            tracing::debug!(
                model = %self.model,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "messages call completed"
            );
        }

        let text: String = message
            .content
            .iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text.as_str())
            .collect();
        if text.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(text)
    }
}
