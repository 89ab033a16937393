//! Core data models used by the library.

use serde::{Deserialize, Serialize};

/// Canonical record stored in Qdrant.
///
/// `is_faq` is an explicit tag decided at ingestion time. Query-time code
/// must rely on this field and never re-derive FAQ membership from the
/// filename.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Unique, path-like identifier (relative path inside the docs folder).
    pub filename: String,
    /// Full document (or chunk) text.
    pub content: String,
    /// Embedding vector for `content`.
    pub embedding: Vec<f32>,
    /// Whether the document belongs to the curated FAQ set.
    pub is_faq: bool,
}

/// A single retrieval hit with similarity score, text and FAQ tag.
///
/// Ephemeral, produced per query, never persisted.
#[derive(Clone, Debug)]
pub struct ScoredMatch {
    pub filename: String,
    pub content: String,
    /// Similarity in `[0, 1]`; higher is more similar.
    pub similarity: f32,
    pub is_faq: bool,
}

/// Clamps a content preview for transport/UI.
///
/// Appends `"..."` only when the text was actually cut.
pub fn clamp_preview(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_is_clamped_only_when_needed() {
        assert_eq!(clamp_preview("short", 200), "short");
        let long = "x".repeat(300);
        let p = clamp_preview(&long, 200);
        assert_eq!(p.chars().count(), 203);
        assert!(p.ends_with("..."));
    }
}
