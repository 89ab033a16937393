//! Context assembly rules per match tier.

use doc_store::ScoredMatch;

use crate::types::{ContextBundle, ContextKind, MatchTier};

/// Near-deterministic sampling for exact FAQ hits.
const TEMP_FAQ_ONLY: f32 = 0.1;
/// Slightly tolerant sampling for mixed FAQ/document contexts.
const TEMP_FAQ_AND_DOCS: f32 = 0.2;
/// Most permissive sampling for the general-corpus fallback.
const TEMP_DOCS_ONLY: f32 = 0.3;

/// Builds the context bundle for one query. Pure function.
///
/// | tier   | passages                      | kind         | temperature |
/// |--------|-------------------------------|--------------|-------------|
/// | High   | first 3 FAQ                   | FaqOnly      | 0.1         |
/// | Medium | first 2 FAQ + first 2 docs    | FaqAndDocs   | 0.2         |
/// | Low    | all supplied docs, FAQ barred | DocsOnly     | 0.3         |
///
/// An empty passage list must be treated by the caller as a terminal
/// "no relevant content" result; the generator is not to be called with it.
pub fn compose(
    tier: MatchTier,
    faq_matches: &[ScoredMatch],
    doc_matches: &[ScoredMatch],
) -> ContextBundle {
    match tier {
        MatchTier::High => ContextBundle {
            passages: contents(faq_matches, 3),
            kind: ContextKind::FaqOnly,
            temperature: TEMP_FAQ_ONLY,
        },
        MatchTier::Medium => {
            let mut passages = contents(faq_matches, 2);
            passages.extend(contents(doc_matches, 2));
            ContextBundle {
                passages,
                kind: ContextKind::FaqAndDocs,
                temperature: TEMP_FAQ_AND_DOCS,
            }
        }
        MatchTier::Low => ContextBundle {
            passages: contents(doc_matches, usize::MAX),
            kind: ContextKind::DocsOnly,
            temperature: TEMP_DOCS_ONLY,
        },
    }
}

fn contents(matches: &[ScoredMatch], take: usize) -> Vec<String> {
    matches
        .iter()
        .take(take)
        .map(|m| m.content.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sm;

    #[test]
    fn high_takes_top_three_faq_only() {
        let faq = vec![
            sm("faq/a.md", 0.9, true),
            sm("faq/b.md", 0.8, true),
            sm("faq/c.md", 0.77, true),
            sm("faq/d.md", 0.76, true),
        ];
        let docs = vec![sm("doc.md", 0.7, false)];
        let b = compose(MatchTier::High, &faq, &docs);
        assert_eq!(b.kind, ContextKind::FaqOnly);
        assert_eq!(b.temperature, 0.1);
        assert_eq!(b.passages.len(), 3);
        assert!(b.passages.iter().all(|p| p.contains("faq/")));
    }

    #[test]
    fn medium_blends_two_and_two_faq_first() {
        let faq = vec![sm("faq/a.md", 0.7, true), sm("faq/b.md", 0.68, true)];
        let docs = vec![sm("x.md", 0.66, false), sm("y.md", 0.6, false)];
        let b = compose(MatchTier::Medium, &faq, &docs);
        assert_eq!(b.kind, ContextKind::FaqAndDocs);
        assert_eq!(b.temperature, 0.2);
        assert_eq!(b.passages.len(), 4);
        assert!(b.passages[0].contains("faq/a.md"));
        assert!(b.passages[2].contains("x.md"));
    }

    #[test]
    fn medium_without_docs_keeps_faq_subset() {
        let faq = vec![sm("faq/a.md", 0.7, true)];
        let b = compose(MatchTier::Medium, &faq, &[]);
        assert_eq!(b.kind, ContextKind::FaqAndDocs);
        assert_eq!(b.passages.len(), 1);
    }

    #[test]
    fn low_uses_all_docs_and_excludes_faq() {
        let faq = vec![sm("faq/a.md", 0.5, true)];
        let docs = vec![
            sm("x.md", 0.6, false),
            sm("y.md", 0.55, false),
            sm("z.md", 0.5, false),
        ];
        let b = compose(MatchTier::Low, &faq, &docs);
        assert_eq!(b.kind, ContextKind::DocsOnly);
        assert_eq!(b.temperature, 0.3);
        assert_eq!(b.passages.len(), 3);
    }

    #[test]
    fn compose_is_pure() {
        let faq = vec![sm("faq/a.md", 0.7, true)];
        let docs = vec![sm("x.md", 0.66, false)];
        let a = compose(MatchTier::Medium, &faq, &docs);
        let b = compose(MatchTier::Medium, &faq, &docs);
        assert_eq!(a, b);
    }

    #[test]
    fn low_with_no_docs_is_empty() {
        let b = compose(MatchTier::Low, &[], &[]);
        assert!(b.passages.is_empty());
    }
}
