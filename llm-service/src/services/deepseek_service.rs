//! DeepSeek service for text generation.
//!
//! DeepSeek exposes the same OpenAI-compatible chat-completions endpoint as
//! Groq, so this client mirrors [`GroqService`](super::groq_service) with
//! DeepSeek-specific validation and defaults:
//! - POST {endpoint}/v1/chat/completions — chat completion (non-streaming)

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        HttpError, LlmServiceError, ProviderError, ProviderErrorKind, is_http_url, make_snippet,
    },
};

/// Thin client for the DeepSeek API.
#[derive(Debug)]
pub struct DeepSeekService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
}

impl DeepSeekService {
    /// Creates a new [`DeepSeekService`] from the given config.
    ///
    /// # Errors
    /// Same validation rules as `GroqService::new`, attributed to DeepSeek.
    pub fn new(cfg: LlmModelConfig) -> Result<Self, LlmServiceError> {
        if cfg.provider != LlmProvider::DeepSeek {
            return Err(ProviderError::new(
                LlmProvider::DeepSeek,
                ProviderErrorKind::InvalidProvider,
            )
            .into());
        }

        let api_key = cfg.api_key.clone().ok_or_else(|| {
            ProviderError::new(LlmProvider::DeepSeek, ProviderErrorKind::MissingApiKey)
        })?;

        let endpoint = cfg.endpoint.trim();
        if !is_http_url(endpoint) {
            return Err(ProviderError::new(
                LlmProvider::DeepSeek,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e| {
                ProviderError::new(
                    LlmProvider::DeepSeek,
                    ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
                )
            })?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_chat = format!("{}/v1/chat/completions", base);

        info!(
            provider = ?cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            "DeepSeekService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
        })
    }

    /// Performs a **non-streaming** chat completion request.
    ///
    /// `temperature` overrides the config default when supplied.
    pub async fn generate(
        &self,
        prompt: &str,
        system: Option<&str>,
        temperature: Option<f32>,
    ) -> Result<String, LlmServiceError> {
        let started = Instant::now();

        let mut messages = Vec::with_capacity(2);
        if let Some(sys) = system {
            messages.push(Msg {
                role: "system",
                content: sys,
            });
        }
        messages.push(Msg {
            role: "user",
            content: prompt,
        });

        let body = Req {
            model: &self.cfg.model,
            messages,
            temperature: temperature.or(self.cfg.temperature),
            max_tokens: self.cfg.max_tokens,
        };

        debug!(model = %self.cfg.model, prompt_len = prompt.len(), "POST {}", self.url_chat);

        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "DeepSeek /v1/chat/completions returned non-success status"
            );

            return Err(ProviderError::new(
                LlmProvider::DeepSeek,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: Resp = resp.json().await.map_err(|e| {
            ProviderError::new(
                LlmProvider::DeepSeek,
                ProviderErrorKind::Decode(format!(
                    "serde error: {e}; expected `choices[0].message.content`"
                )),
            )
        })?;

        let content = out
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .ok_or_else(|| {
                ProviderError::new(LlmProvider::DeepSeek, ProviderErrorKind::EmptyChoices)
            })?;

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            "chat completion completed"
        );

        Ok(content.trim().to_string())
    }

    /// Model identifier from the active config.
    pub fn model(&self) -> &str {
        &self.cfg.model
    }
}

#[derive(Debug, Serialize)]
struct Req<'a> {
    model: &'a str,
    messages: Vec<Msg<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct Resp {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MsgOut,
}

#[derive(Debug, Deserialize)]
struct MsgOut {
    content: Option<String>,
}
