//! Result and classification types exchanged across pipeline stages.

use doc_store::ScoredMatch;
use serde::{Deserialize, Serialize};

/// Discrete confidence that a query matches the curated FAQ set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    High,
    Medium,
    Low,
}

/// Which passage sources compose a context bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextKind {
    FaqOnly,
    FaqAndDocs,
    DocsOnly,
}

/// Source kind of a retrieved document, as reported to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocKind {
    Faq,
    Document,
}

/// Outcome of the FAQ classification stage.
#[derive(Clone, Debug)]
pub struct Classification {
    pub tier: MatchTier,
    /// FAQ-tagged matches, best first, at most `faq_top_k`.
    pub faq_matches: Vec<ScoredMatch>,
    /// Score of the best FAQ match; `0.0` when there is none.
    pub best_similarity: f32,
}

/// Finalized passages, source mix and sampling temperature for one query.
///
/// Built fresh per query; ordering matters because FAQ passages come before
/// document passages to establish prompt priority.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextBundle {
    pub passages: Vec<String>,
    pub kind: ContextKind,
    pub temperature: f32,
}

/// Provenance entry attached to a query result.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelevantDoc {
    pub filename: String,
    pub similarity: f32,
    pub kind: DocKind,
    /// First ~200 characters of the passage.
    pub preview: String,
}

/// What the pipeline returns upward for every query, success or failure.
#[derive(Clone, Debug, Serialize)]
pub struct QueryResult {
    pub answer: String,
    pub match_tier: MatchTier,
    /// Absent when no context bundle was built (early exits).
    pub context_kind: Option<ContextKind>,
    pub best_faq_similarity: f32,
    pub relevant_documents: Vec<RelevantDoc>,
    /// Structured error note; the answer still carries a user-facing text.
    pub error: Option<String>,
}

impl QueryResult {
    /// Early-exit result carrying only a message and an error tag.
    pub fn terminal(answer: impl Into<String>, tier: MatchTier, error: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            match_tier: tier,
            context_kind: None,
            best_faq_similarity: 0.0,
            relevant_documents: Vec::new(),
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_and_kinds_serialize_snake_case() {
        assert_eq!(serde_json::to_string(&MatchTier::High).unwrap(), "\"high\"");
        assert_eq!(
            serde_json::to_string(&ContextKind::FaqAndDocs).unwrap(),
            "\"faq_and_docs\""
        );
        assert_eq!(serde_json::to_string(&DocKind::Faq).unwrap(), "\"faq\"");
    }
}
