use std::path::PathBuf;
use std::sync::Arc;

use chat_core::{ChatConfig, ProviderGenerator, QueryPipeline, SessionRegistry};
use doc_store::embed::ollama::{OllamaConfig, OllamaEmbedder};
use doc_store::{DistanceKind, DocStore, EmbeddingsProvider, StoreConfig};
use llm_service::LlmModelConfig;
use llm_service::config::default_config::config_from_env;

use crate::error_handler::{AppError, AppResult};

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// Live chat sessions over the shared query pipeline.
    pub registry: SessionRegistry,
    /// Qdrant-backed store, used directly by the ingest endpoint.
    pub store: Arc<DocStore>,
    /// Embedding backend shared by ingestion and the pipeline.
    pub embedder: Arc<dyn EmbeddingsProvider>,
    /// Folder scanned for markdown documents.
    pub docs_dir: PathBuf,
    /// Embedding model name, for stats reporting.
    pub embedding_model: String,
    /// Active LLM configuration, used by the health probe.
    pub llm_config: LlmModelConfig,
}

impl AppState {
    /// Load shared state from environment variables.
    pub fn from_env() -> AppResult<Self> {
        let embedding_model =
            std::env::var("EMBEDDING_MODEL").unwrap_or_else(|_| "nomic-embed-text".into());
        let embedding_dim = std::env::var("EMBEDDING_DIM")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(768);

        let store_cfg = StoreConfig {
            qdrant_url: std::env::var("QDRANT_URL")
                .unwrap_or_else(|_| "http://localhost:6334".into()),
            qdrant_api_key: std::env::var("QDRANT_API_KEY").ok(),
            collection: std::env::var("QDRANT_COLLECTION").unwrap_or_else(|_| "documents".into()),
            distance: DistanceKind::Cosine,
            exact_search: std::env::var("RAG_EXACT_SEARCH").as_deref() == Ok("true"),
            embedding_dim: Some(embedding_dim),
            timeout_secs: 30,
        };
        let store = Arc::new(DocStore::new(store_cfg)?);

        let embedder: Arc<dyn EmbeddingsProvider> = Arc::new(OllamaEmbedder::new(OllamaConfig {
            endpoint: std::env::var("OLLAMA_URL")
                .unwrap_or_else(|_| "http://localhost:11434".into()),
            model: embedding_model.clone(),
            dim: embedding_dim,
            timeout_secs: 60,
        })?);

        let llm_config = config_from_env()?;
        let generator = Arc::new(ProviderGenerator::from_config(llm_config.clone())?);

        let chat_cfg = ChatConfig::from_env();
        let index: Arc<dyn doc_store::VectorIndex> = store.clone();
        let pipeline = Arc::new(QueryPipeline::new(
            index,
            Arc::clone(&embedder),
            generator,
            chat_cfg,
        )?);

        let docs_dir = PathBuf::from(std::env::var("DOCS_DIR").unwrap_or_else(|_| "data/docs".into()));
        if docs_dir.as_os_str().is_empty() {
            return Err(AppError::Config("DOCS_DIR is empty".into()));
        }

        Ok(Self {
            registry: SessionRegistry::new(pipeline),
            store,
            embedder,
            docs_dir,
            embedding_model,
            llm_config,
        })
    }
}
