//! Universal health service for LLM backends (Groq, DeepSeek).
//!
//! Both providers are OpenAI-compatible, so the probe is the same:
//! `GET {endpoint}/v1/models` with Bearer auth.
//!
//! The returned [`HealthStatus`] is JSON-serializable and suitable for a
//! `/health` endpoint. [`HealthService::check`] is resilient and never fails
//! (errors mapped to `ok=false`).

use std::time::{Duration, Instant};

use reqwest::header;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::llm_model_config::LlmModelConfig;
use crate::error_handler::{LlmServiceError, is_http_url};

/// A serializable health snapshot for a single provider/config.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Backend/provider (e.g., "Groq", "DeepSeek").
    pub provider: String,
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Model identifier relevant to the probe.
    pub model: String,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds for the probe.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

/// A health checker that reuses a single HTTP client.
pub struct HealthService {
    client: reqwest::Client,
}

impl HealthService {
    /// Creates a new health service with an optional client timeout (seconds).
    ///
    /// # Errors
    /// Returns [`LlmServiceError::HttpTransport`] if the HTTP client cannot
    /// be built.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, LlmServiceError> {
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Checks health for a single LLM config.
    ///
    /// This method is **resilient**: it never returns an error. Any failure
    /// is converted to `HealthStatus { ok: false, message: ... }`.
    pub async fn check(&self, cfg: &LlmModelConfig) -> HealthStatus {
        let endpoint = cfg.endpoint.trim();
        let mut status = HealthStatus {
            provider: format!("{:?}", cfg.provider),
            endpoint: endpoint.to_string(),
            model: cfg.model.clone(),
            ok: false,
            latency_ms: 0,
            message: String::new(),
        };

        if !is_http_url(endpoint) {
            warn!(provider = ?cfg.provider, endpoint = %cfg.endpoint, "invalid endpoint");
            status.message = "invalid endpoint (empty or missing http/https)".into();
            return status;
        }

        let url = format!("{}/v1/models", endpoint.trim_end_matches('/'));
        let started = Instant::now();

        let mut req = self.client.get(&url);
        if let Some(key) = &cfg.api_key {
            req = req.header(header::AUTHORIZATION, format!("Bearer {key}"));
        }

        match req.send().await {
            Ok(resp) => {
                status.latency_ms = started.elapsed().as_millis();
                if resp.status().is_success() {
                    debug!(provider = ?cfg.provider, latency_ms = status.latency_ms, "health probe ok");
                    status.ok = true;
                    status.message = "reachable".into();
                } else {
                    status.message = format!("HTTP {} from {}", resp.status(), url);
                }
            }
            Err(e) => {
                status.latency_ms = started.elapsed().as_millis();
                status.message = format!("transport error: {e}");
            }
        }

        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::llm_provider::LlmProvider;

    #[tokio::test]
    async fn invalid_endpoint_is_reported_unhealthy() {
        let svc = HealthService::new(Some(1)).unwrap();
        let cfg = LlmModelConfig {
            provider: LlmProvider::Groq,
            model: "llama-3.3-70b-versatile".into(),
            endpoint: "api.groq.com".into(),
            api_key: Some("key".into()),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(1),
        };
        let status = svc.check(&cfg).await;
        assert!(!status.ok);
        assert!(status.message.contains("invalid endpoint"));
    }
}
