//! FAQ match classification with a two-threshold tier rule.

use tracing::debug;

use crate::cfg::ChatConfig;
use crate::error::Result;
use crate::retriever::Retriever;
use crate::types::{Classification, MatchTier};

/// Classifies how strongly a query matches the FAQ set.
#[derive(Clone)]
pub struct FaqClassifier {
    retriever: Retriever,
    high_threshold: f32,
    medium_threshold: f32,
}

impl FaqClassifier {
    pub fn new(retriever: Retriever, cfg: &ChatConfig) -> Self {
        Self {
            retriever,
            high_threshold: cfg.high_threshold,
            medium_threshold: cfg.medium_threshold,
        }
    }

    /// Retrieves candidates and assigns a tier from the best FAQ similarity.
    ///
    /// Requests `2 * top_k` results at the medium threshold, then keeps only
    /// FAQ-tagged records, truncated to `top_k`. The over-fetch compensates
    /// for FAQ records being a minority of the unfiltered result set; without
    /// it a highly relevant general document could crowd out genuine FAQ
    /// matches before filtering.
    pub async fn classify(&self, query: &str, top_k: usize) -> Result<Classification> {
        let all = self
            .retriever
            .retrieve(query, self.medium_threshold, top_k * 2)
            .await?;

        let mut faq_matches: Vec<_> = all.into_iter().filter(|m| m.is_faq).collect();
        faq_matches.truncate(top_k);

        if faq_matches.is_empty() {
            return Ok(Classification {
                tier: MatchTier::Low,
                faq_matches,
                best_similarity: 0.0,
            });
        }

        let best_similarity = faq_matches[0].similarity;
        let tier = if best_similarity >= self.high_threshold {
            MatchTier::High
        } else if best_similarity >= self.medium_threshold {
            MatchTier::Medium
        } else {
            MatchTier::Low
        };

        debug!(
            target: "chat_core::classifier",
            "classify: best={best_similarity:.3} tier={tier:?} faq_hits={}",
            faq_matches.len()
        );

        Ok(Classification {
            tier,
            faq_matches,
            best_similarity,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::{StubEmbedder, StubIndex, sm};

    fn classifier(matches: Vec<doc_store::ScoredMatch>) -> FaqClassifier {
        let retriever = Retriever::new(
            Arc::new(StubIndex::with_matches(matches)),
            Arc::new(StubEmbedder::default()),
        );
        FaqClassifier::new(retriever, &ChatConfig::default())
    }

    #[tokio::test]
    async fn best_at_high_threshold_is_high() {
        let c = classifier(vec![sm("faq/a.md", 0.75, true)]);
        let out = c.classify("q", 5).await.unwrap();
        assert_eq!(out.tier, MatchTier::High);
        assert_eq!(out.best_similarity, 0.75);
    }

    #[tokio::test]
    async fn just_below_high_is_medium() {
        let c = classifier(vec![sm("faq/a.md", 0.7499, true)]);
        let out = c.classify("q", 5).await.unwrap();
        assert_eq!(out.tier, MatchTier::Medium);
    }

    #[tokio::test]
    async fn best_at_medium_threshold_is_medium() {
        let c = classifier(vec![sm("faq/a.md", 0.65, true)]);
        let out = c.classify("q", 5).await.unwrap();
        assert_eq!(out.tier, MatchTier::Medium);
    }

    #[tokio::test]
    async fn below_medium_threshold_yields_low_and_zero() {
        // The retriever already drops sub-threshold hits, so no FAQ survives.
        let c = classifier(vec![sm("faq/a.md", 0.6, true), sm("doc.md", 0.9, false)]);
        let out = c.classify("q", 5).await.unwrap();
        assert_eq!(out.tier, MatchTier::Low);
        assert_eq!(out.best_similarity, 0.0);
        assert!(out.faq_matches.is_empty());
    }

    #[tokio::test]
    async fn non_faq_hits_are_filtered_out() {
        let c = classifier(vec![
            sm("general.md", 0.95, false),
            sm("faq/a.md", 0.80, true),
            sm("faq/b.md", 0.70, true),
        ]);
        let out = c.classify("q", 5).await.unwrap();
        assert_eq!(out.tier, MatchTier::High);
        assert_eq!(out.faq_matches.len(), 2);
        assert!(out.faq_matches.iter().all(|m| m.is_faq));
    }

    #[tokio::test]
    async fn faq_list_is_truncated_to_top_k() {
        let c = classifier(vec![
            sm("faq/a.md", 0.9, true),
            sm("faq/b.md", 0.8, true),
            sm("faq/c.md", 0.7, true),
        ]);
        let out = c.classify("q", 2).await.unwrap();
        assert_eq!(out.faq_matches.len(), 2);
        assert_eq!(out.faq_matches[0].filename, "faq/a.md");
    }
}
