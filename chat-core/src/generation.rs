//! Generation port and provider-backed implementation.

use doc_store::BoxFuture;
use llm_service::config::default_config::config_from_env;
use llm_service::config::llm_provider::LlmProvider;
use llm_service::services::deepseek_service::DeepSeekService;
use llm_service::services::groq_service::GroqService;
use llm_service::{LlmModelConfig, LlmServiceError};
use tracing::debug;

use crate::prompt;
use crate::types::ContextKind;

/// Text generation capability consumed by the pipeline.
///
/// The pipeline depends only on this trait; one implementation exists per
/// provider and tests substitute counting stubs.
pub trait GenerationPort: Send + Sync {
    /// Generates an answer grounded in the given context passages.
    fn generate<'a>(
        &'a self,
        query: &'a str,
        passages: &'a [String],
        temperature: f32,
        kind: ContextKind,
    ) -> BoxFuture<'a, Result<String, LlmServiceError>>;

    /// Plain chat without retrieved context.
    fn simple_chat<'a>(
        &'a self,
        message: &'a str,
        temperature: f32,
    ) -> BoxFuture<'a, Result<String, LlmServiceError>>;

    /// Model identifier, for stats reporting.
    fn model_name(&self) -> &str;
}

/// [`GenerationPort`] backed by one of the supported chat-completion providers.
pub enum ProviderGenerator {
    Groq(GroqService),
    DeepSeek(DeepSeekService),
}

impl ProviderGenerator {
    /// Builds the provider selected by `LLM_PROVIDER`.
    pub fn from_env() -> Result<Self, LlmServiceError> {
        let cfg = config_from_env()?;
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: LlmModelConfig) -> Result<Self, LlmServiceError> {
        match cfg.provider {
            LlmProvider::Groq => Ok(Self::Groq(GroqService::new(cfg)?)),
            LlmProvider::DeepSeek => Ok(Self::DeepSeek(DeepSeekService::new(cfg)?)),
        }
    }

    async fn call(
        &self,
        prompt: &str,
        system: Option<&str>,
        temperature: f32,
    ) -> Result<String, LlmServiceError> {
        match self {
            Self::Groq(svc) => svc.generate(prompt, system, Some(temperature)).await,
            Self::DeepSeek(svc) => svc.generate(prompt, system, Some(temperature)).await,
        }
    }
}

impl GenerationPort for ProviderGenerator {
    fn generate<'a>(
        &'a self,
        query: &'a str,
        passages: &'a [String],
        temperature: f32,
        kind: ContextKind,
    ) -> BoxFuture<'a, Result<String, LlmServiceError>> {
        Box::pin(async move {
            let system = prompt::system_instruction(kind);
            let user = prompt::build_user_prompt(kind, passages, query);
            debug!(
                target: "chat_core::generation",
                "generate: kind={kind:?} passages={} temperature={temperature}",
                passages.len()
            );
            self.call(&user, Some(system), temperature).await
        })
    }

    fn simple_chat<'a>(
        &'a self,
        message: &'a str,
        temperature: f32,
    ) -> BoxFuture<'a, Result<String, LlmServiceError>> {
        Box::pin(async move { self.call(message, None, temperature).await })
    }

    fn model_name(&self) -> &str {
        match self {
            Self::Groq(svc) => svc.model(),
            Self::DeepSeek(svc) => svc.model(),
        }
    }
}
