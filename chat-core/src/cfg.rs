//! Runtime configuration loaded from environment variables.

use crate::error::ChatError;

/// Knobs for the query pipeline. All fields have defaults via [`ChatConfig::from_env`].
///
/// The two similarity thresholds are policy values, not algorithmic
/// constants, and are kept externally tunable.
#[derive(Clone, Debug)]
pub struct ChatConfig {
    /// Best FAQ similarity at or above this value is a strong match.
    pub high_threshold: f32,
    /// Best FAQ similarity at or above this value (but below high) is a
    /// medium match; below it the FAQ set is considered missed.
    pub medium_threshold: f32,
    /// Default number of passages retrieved per source.
    pub top_k: usize,
    /// Maximum FAQ candidates kept by the classifier.
    pub faq_top_k: usize,
    /// Conversation turns retained per session.
    pub max_history: usize,
}

impl ChatConfig {
    /// Build from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            high_threshold: parse("FAQ_HIGH_THRESHOLD", 0.75f32),
            medium_threshold: parse("FAQ_MEDIUM_THRESHOLD", 0.65f32),
            top_k: parse("RAG_TOP_K", 4usize),
            faq_top_k: parse("FAQ_TOP_K", 5usize),
            max_history: parse("MAX_HISTORY", 10usize),
        }
    }

    /// Rejects threshold orderings that would make the tier rule vacuous.
    pub fn validate(&self) -> Result<(), ChatError> {
        if !(0.0..=1.0).contains(&self.high_threshold)
            || !(0.0..=1.0).contains(&self.medium_threshold)
        {
            return Err(ChatError::Config(
                "thresholds must lie in [0, 1]".into(),
            ));
        }
        if self.medium_threshold > self.high_threshold {
            return Err(ChatError::Config(format!(
                "medium threshold {} exceeds high threshold {}",
                self.medium_threshold, self.high_threshold
            )));
        }
        if self.top_k == 0 || self.faq_top_k == 0 {
            return Err(ChatError::Config("top_k values must be > 0".into()));
        }
        Ok(())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            high_threshold: 0.75,
            medium_threshold: 0.65,
            top_k: 4,
            faq_top_k: 5,
            max_history: 10,
        }
    }
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(dflt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_are_ordered() {
        let cfg = ChatConfig::default();
        assert!(cfg.validate().is_ok());
        assert!(cfg.medium_threshold < cfg.high_threshold);
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let cfg = ChatConfig {
            high_threshold: 0.5,
            medium_threshold: 0.9,
            ..ChatConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
