//! Default LLM configs loaded strictly from environment variables.
//!
//! Convenience constructors for [`LlmModelConfig`], one per provider, plus a
//! selector that reads `LLM_PROVIDER` and returns the matching config.
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_PROVIDER`   = provider name (`groq` | `deepseek`, default `groq`)
//! - `LLM_MAX_TOKENS` = optional max tokens (u32)
//!
//! Groq:
//! - `GROQ_API_KEY` (mandatory)
//! - `GROQ_MODEL`   (default `llama-3.3-70b-versatile`)
//! - `GROQ_URL`     (default `https://api.groq.com/openai`)
//!
//! DeepSeek:
//! - `DEEPSEEK_API_KEY` (mandatory)
//! - `DEEPSEEK_MODEL`   (default `deepseek-chat`)
//! - `DEEPSEEK_URL`     (default `https://api.deepseek.com`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{ConfigError, LlmServiceError, env_opt_u32, must_env, validate_http_endpoint},
};

/// Constructs a config for the **Groq** chat provider.
///
/// # Errors
/// Returns [`ConfigError::MissingVar`] if `GROQ_API_KEY` is absent, or
/// [`ConfigError::InvalidFormat`] if `GROQ_URL` lacks an HTTP scheme.
pub fn config_groq() -> Result<LlmModelConfig, LlmServiceError> {
    let api_key = must_env("GROQ_API_KEY")?;
    let model = env_or("GROQ_MODEL", "llama-3.3-70b-versatile");
    let endpoint = env_or("GROQ_URL", "https://api.groq.com/openai");
    validate_http_endpoint("GROQ_URL", &endpoint)?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Groq,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens: max_tokens.or(Some(2000)),
        temperature: Some(0.3),
        top_p: None,
        timeout_secs: Some(60),
    })
}

/// Constructs a config for the **DeepSeek** chat provider.
///
/// # Errors
/// Returns [`ConfigError::MissingVar`] if `DEEPSEEK_API_KEY` is absent, or
/// [`ConfigError::InvalidFormat`] if `DEEPSEEK_URL` lacks an HTTP scheme.
pub fn config_deepseek() -> Result<LlmModelConfig, LlmServiceError> {
    let api_key = must_env("DEEPSEEK_API_KEY")?;
    let model = env_or("DEEPSEEK_MODEL", "deepseek-chat");
    let endpoint = env_or("DEEPSEEK_URL", "https://api.deepseek.com");
    validate_http_endpoint("DEEPSEEK_URL", &endpoint)?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::DeepSeek,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens: max_tokens.or(Some(2000)),
        temperature: Some(0.7),
        top_p: None,
        timeout_secs: Some(60),
    })
}

/// Resolves the active provider from `LLM_PROVIDER` and builds its config.
///
/// # Errors
/// - [`ConfigError::UnsupportedProvider`] for an unknown provider name
/// - the provider constructor's errors otherwise
pub fn config_from_env() -> Result<LlmModelConfig, LlmServiceError> {
    let name = env_or("LLM_PROVIDER", "groq");
    match LlmProvider::from_name(&name) {
        Some(LlmProvider::Groq) => config_groq(),
        Some(LlmProvider::DeepSeek) => config_deepseek(),
        None => Err(ConfigError::UnsupportedProvider(name).into()),
    }
}

fn env_or(name: &str, dflt: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| dflt.to_string())
}
