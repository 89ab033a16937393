//! Ollama embedding provider implementation.
//!
//! Thin client for `POST {endpoint}/api/embeddings` using `reqwest::Client`.
//! Usually paired with a dedicated embedding model such as
//! `nomic-embed-text`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::embed::EmbeddingsProvider;
use crate::errors::StoreError;
use crate::index::BoxFuture;

/// Configuration for the Ollama embedding backend.
#[derive(Clone, Debug)]
pub struct OllamaConfig {
    /// Ollama endpoint, e.g. `http://localhost:11434`.
    pub endpoint: String,
    /// Embedding model name.
    pub model: String,
    /// Expected embedding dimension size.
    pub dim: usize,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

/// Ollama embedding provider (async).
#[derive(Clone)]
pub struct OllamaEmbedder {
    client: reqwest::Client,
    model: String,
    url_embeddings: String,
    dim: usize,
}

impl OllamaEmbedder {
    /// Construct a new embedder from configuration.
    pub fn new(cfg: OllamaConfig) -> Result<Self, StoreError> {
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(StoreError::Config(format!(
                "invalid ollama endpoint: {}",
                cfg.endpoint
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs.max(1)))
            .build()
            .map_err(|e| StoreError::Embedding(e.to_string()))?;

        let base = endpoint.trim_end_matches('/').to_string();
        Ok(Self {
            client,
            model: cfg.model,
            url_embeddings: format!("{}/api/embeddings", base),
            dim: cfg.dim,
        })
    }
}

impl EmbeddingsProvider for OllamaEmbedder {
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, StoreError>> {
        Box::pin(async move {
            let body = EmbeddingsRequest {
                model: &self.model,
                prompt: text,
            };

            debug!("POST {}", self.url_embeddings);
            let resp = self
                .client
                .post(&self.url_embeddings)
                .json(&body)
                .send()
                .await
                .map_err(|e| StoreError::Embedding(e.to_string()))?;

            if !resp.status().is_success() {
                let status = resp.status();
                let text = resp.text().await.unwrap_or_default();
                let snippet = text.chars().take(240).collect::<String>();
                return Err(StoreError::Embedding(format!(
                    "unexpected HTTP status {status} from {}: {snippet}",
                    self.url_embeddings
                )));
            }

            let out: EmbeddingsResponse = resp.json().await.map_err(|e| {
                StoreError::Embedding(format!(
                    "decode error: {e}; expected `{{ embedding: number[] }}`"
                ))
            })?;

            if out.embedding.len() != self.dim {
                return Err(StoreError::VectorSizeMismatch {
                    got: out.embedding.len(),
                    want: self.dim,
                });
            }

            Ok(out.embedding)
        })
    }

    fn dim(&self) -> Option<usize> {
        Some(self.dim)
    }
}

/// Request body for `/api/embeddings`.
#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Response body for `/api/embeddings`.
#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_http_endpoints() {
        let cfg = OllamaConfig {
            endpoint: "localhost:11434".into(),
            model: "nomic-embed-text".into(),
            dim: 768,
            timeout_secs: 30,
        };
        assert!(OllamaEmbedder::new(cfg).is_err());
    }
}
