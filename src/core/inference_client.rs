// src/core/inference_client.rs
//! Hosted chat-completion client (Hugging Face, OpenAI-compatible route)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{error, info, trace};

use crate::types::response::{Generation, GenerationStatus};

const CHAT_COMPLETIONS_ENDPOINT: &str = "/chat/completions";

pub const NOT_CONFIGURED_MESSAGE: &str = "⚠️ Модель не настроена. Проверьте HF_TOKEN в secrets.";

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TOP_P: f32 = 0.95;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl ChatRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            max_tokens,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
        }
    }
}

#[rocket::async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Generated text for the request
    async fn complete(&self, request: &ChatRequest) -> Result<String>;

    fn model_id(&self) -> &str;
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatCompletionChoice>,
}

pub struct HfInferenceClient {
    client: reqwest::Client,
    base_url: String,
    model_id: String,
    token: String,
}

impl HfInferenceClient {
    pub fn new(
        base_url: String,
        model_id: String,
        token: String,
        timeout_seconds: u64,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model_id,
            token,
        })
    }

    fn body(&self, request: &ChatRequest) -> ChatCompletionBody {
        ChatCompletionBody {
            model: self.model_id.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: request.system.clone(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: request.user.clone(),
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
        }
    }
}

#[rocket::async_trait]
impl ChatCompletion for HfInferenceClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let url = format!("{}{}", self.base_url, CHAT_COMPLETIONS_ENDPOINT);

        trace!("Calling chat completion: {} (model {})", url, self.model_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&self.body(request))
            .send()
            .await
            .context("Chat completion request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Inference API returned {}: {}", status, error_text);
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse chat completion response")?;

        extract_text(completion)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

fn extract_text(completion: ChatCompletionResponse) -> Result<String> {
    let choice = completion
        .choices
        .into_iter()
        .next()
        .context("Model returned no choices")?;

    let content = choice
        .message
        .content
        .context("Model returned a choice without content")?;

    Ok(content.trim().to_string())
}

/// Run one chat completion and turn the outcome into displayable text.
///
/// Without a client no request is made and the fixed "not configured"
/// message is returned.
pub async fn call_model(client: Option<&dyn ChatCompletion>, request: &ChatRequest) -> Generation {
    let Some(client) = client else {
        return Generation {
            status: GenerationStatus::NotConfigured,
            text: NOT_CONFIGURED_MESSAGE.to_string(),
        };
    };

    match client.complete(request).await {
        Ok(text) => {
            info!(
                "Model {} returned {} characters",
                client.model_id(),
                text.chars().count()
            );
            Generation {
                status: GenerationStatus::Generated,
                text,
            }
        }
        Err(e) => {
            error!("Model call failed: {:#}", e);
            Generation {
                status: GenerationStatus::Failed,
                text: format!("⚠️ Ошибка при вызове модели: {:#}", e),
            }
        }
    }
}
