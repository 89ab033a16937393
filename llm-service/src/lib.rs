//! Shared LLM generation service.
//!
//! Provides thin, non-streaming chat-completion clients for the supported
//! providers (Groq and DeepSeek, both OpenAI-compatible), a unified error
//! taxonomy, env-driven default configs, and endpoint health checks.
//!
//! Callers pick a provider through [`config::llm_provider::LlmProvider`] and
//! never talk to a concrete service type outside this crate.

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod services;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::{LlmServiceError, Result};
