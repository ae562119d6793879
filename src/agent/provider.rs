//! Model provider abstraction for chat completion APIs
//!
//! Supports:
//! - OpenAI (GPT models)
//! - Groq (OpenAI-compatible API)
//! - Ollama (local models, `/api/chat`)
//!
//! # Examples
//!
//! ```no_run
//! use agentica::agent::provider::{create_provider, CompletionRequest};
//! use agentica::agent::Message;
//! use agentica::config::ModelConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Set API key in environment: export OPENAI_API_KEY=sk-...
//! let provider = create_provider(&ModelConfig::default())?;
//! let request = CompletionRequest {
//!     messages: vec![Message::user("Explain Rust ownership")],
//!     model: "gpt-4o-mini".to_string(),
//!     temperature: 0.7,
//!     max_tokens: 500,
//! };
//! let response = provider.complete(&request).await?;
//! println!("Response: {}", response.content);
//! # Ok(())
//! # }
//! ```

use super::state::Message;
use crate::config::{ModelConfig, ModelProvider as ProviderType};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Provider errors
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Model error: {0}")]
    ModelError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ProviderError {
    fn from_send(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::ConnectionError(e.to_string())
        }
    }
}

/// One completion call: the full ordered history plus sampling parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Response from a model provider
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub content: String,
    pub model: String,
    pub finish_reason: Option<String>,
}

/// Model provider trait
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Run a chat completion over the request's messages
    async fn complete(&self, request: &CompletionRequest) -> Result<ProviderResponse, ProviderError>;

    /// Get the configured model name
    fn model_name(&self) -> &str;

    /// Get the provider type
    fn provider_type(&self) -> ProviderType;
}

/// Create a model provider from configuration
pub fn create_provider(config: &ModelConfig) -> Result<Box<dyn ModelProvider>, ProviderError> {
    match config.provider {
        ProviderType::OpenAI => Ok(Box::new(OpenAIProvider::new(config.clone())?)),
        ProviderType::Groq => Ok(Box::new(GroqProvider::new(config.clone())?)),
        ProviderType::Ollama => Ok(Box::new(OllamaProvider::new(config.clone()))),
    }
}

fn build_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_default()
}

// ============================================================================
// OpenAI-compatible Chat Completions (OpenAI, Groq)
// ============================================================================

#[derive(Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    model: String,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessageResponse,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct OpenAIMessageResponse {
    content: Option<String>,
}

/// Extract the first choice of a `/chat/completions` body
fn parse_chat_completion(body: &str) -> Result<ProviderResponse, ProviderError> {
    let response: OpenAIResponse = serde_json::from_str(body)?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::InvalidResponse("No choices in response".to_string()))?;

    let content = choice
        .message
        .content
        .ok_or_else(|| ProviderError::InvalidResponse("Choice has no message content".to_string()))?;

    Ok(ProviderResponse {
        content,
        model: response.model,
        finish_reason: choice.finish_reason,
    })
}

async fn post_chat_completion(
    client: &Client,
    base_url: &str,
    api_key: &str,
    request: &CompletionRequest,
) -> Result<ProviderResponse, ProviderError> {
    let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));

    let body = OpenAIRequest {
        model: &request.model,
        messages: &request.messages,
        temperature: request.temperature,
        max_tokens: request.max_tokens,
    };

    let response = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(ProviderError::from_send)?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ProviderError::AuthError("Invalid API key".to_string()));
    }

    let text = response.text().await?;
    if !status.is_success() {
        return Err(ProviderError::ModelError(format!("HTTP {}: {}", status, text)));
    }

    parse_chat_completion(&text)
}

pub struct OpenAIProvider {
    config: ModelConfig,
    client: Client,
    api_key: String,
}

impl OpenAIProvider {
    pub fn new(config: ModelConfig) -> Result<Self, ProviderError> {
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| ProviderError::AuthError("OpenAI API key not found".to_string()))?;

        let client = build_client(config.timeout_secs);

        Ok(Self { config, client, api_key })
    }
}

#[async_trait]
impl ModelProvider for OpenAIProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<ProviderResponse, ProviderError> {
        post_chat_completion(&self.client, &self.config.url, &self.api_key, request).await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::OpenAI
    }
}

pub struct GroqProvider {
    config: ModelConfig,
    client: Client,
    api_key: String,
}

impl GroqProvider {
    pub fn new(config: ModelConfig) -> Result<Self, ProviderError> {
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| ProviderError::AuthError("Groq API key not found".to_string()))?;

        let client = build_client(config.timeout_secs);

        Ok(Self { config, client, api_key })
    }
}

// Groq uses OpenAI-compatible API, so we reuse the same structures

#[async_trait]
impl ModelProvider for GroqProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<ProviderResponse, ProviderError> {
        post_chat_completion(&self.client, &self.config.url, &self.api_key, request).await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::Groq
    }
}

// ============================================================================
// Ollama Provider
// ============================================================================

pub struct OllamaProvider {
    config: ModelConfig,
    client: Client,
}

impl OllamaProvider {
    pub fn new(config: ModelConfig) -> Self {
        let client = build_client(config.timeout_secs);
        Self { config, client }
    }
}

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    model: String,
    message: OllamaMessage,
    done: bool,
}

#[derive(Deserialize)]
struct OllamaMessage {
    #[serde(default)]
    content: String,
}

#[async_trait]
impl ModelProvider for OllamaProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<ProviderResponse, ProviderError> {
        let url = format!("{}/api/chat", self.config.url.trim_end_matches('/'));

        let body = OllamaChatRequest {
            model: &request.model,
            messages: &request.messages,
            stream: false,
            options: OllamaOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ProviderError::from_send)?;

        if !response.status().is_success() {
            return Err(ProviderError::ModelError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await?
            )));
        }

        let chat: OllamaChatResponse = response.json().await?;

        Ok(ProviderResponse {
            content: chat.message.content,
            model: chat.model,
            finish_reason: Some(if chat.done { "stop" } else { "length" }.to_string()),
        })
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::Ollama
    }
}
