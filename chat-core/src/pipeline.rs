//! Query orchestration: classification, retrieval, context assembly and
//! guarded generation.

use std::sync::Arc;

use doc_store::{EmbeddingsProvider, VectorIndex, clamp_preview};
use tracing::{info, warn};

use crate::cfg::ChatConfig;
use crate::classifier::FaqClassifier;
use crate::composer::compose;
use crate::error::Result;
use crate::generation::GenerationPort;
use crate::retriever::Retriever;
use crate::types::{DocKind, MatchTier, QueryResult, RelevantDoc};

/// Characters kept in document previews.
const PREVIEW_CHARS: usize = 200;

/// Answer returned when nothing has been ingested yet.
pub const NO_DOCUMENTS_ANSWER: &str =
    "There are no documents in the knowledge base. Please run document ingestion first.";
/// Answer returned when no passage survived retrieval and composition.
pub const NO_RELEVANT_ANSWER: &str = "No relevant documents were found for your question.";
/// Degraded answer when the generation backend fails.
pub const GENERATION_FAILED_ANSWER: &str = "An error occurred while generating the answer.";

/// Sequences one query end to end and always returns a well-formed result.
///
/// Generation failures are degraded into the result; store and embedding
/// failures propagate as [`crate::ChatError`].
pub struct QueryPipeline {
    retriever: Retriever,
    classifier: FaqClassifier,
    generator: Arc<dyn GenerationPort>,
    index: Arc<dyn VectorIndex>,
    cfg: ChatConfig,
}

impl QueryPipeline {
    pub fn new(
        index: Arc<dyn VectorIndex>,
        embedder: Arc<dyn EmbeddingsProvider>,
        generator: Arc<dyn GenerationPort>,
        cfg: ChatConfig,
    ) -> Result<Self> {
        cfg.validate()?;
        let retriever = Retriever::new(Arc::clone(&index), embedder);
        let classifier = FaqClassifier::new(retriever.clone(), &cfg);
        Ok(Self {
            retriever,
            classifier,
            generator,
            index,
            cfg,
        })
    }

    pub fn config(&self) -> &ChatConfig {
        &self.cfg
    }

    /// Number of records currently stored.
    pub async fn document_count(&self) -> Result<u64> {
        Ok(self.index.count().await?)
    }

    /// Model identifier of the active generation backend.
    pub fn model_name(&self) -> &str {
        self.generator.model_name()
    }

    /// Plain generation with no retrieved context.
    pub async fn plain_chat(
        &self,
        message: &str,
        temperature: f32,
    ) -> std::result::Result<String, llm_service::LlmServiceError> {
        self.generator.simple_chat(message, temperature).await
    }

    /// Answers one non-blank question through the FAQ-aware pipeline.
    ///
    /// Strong FAQ matches skip the general-document search entirely; a
    /// confident FAQ hit never needs corroborating documents.
    pub async fn answer(&self, question: &str, top_k: usize) -> Result<QueryResult> {
        let top_k = top_k.max(1);

        if self.index.count().await? == 0 {
            info!(target: "chat_core::pipeline", "query rejected: empty corpus");
            return Ok(QueryResult::terminal(
                NO_DOCUMENTS_ANSWER,
                MatchTier::Low,
                "No documents in database",
            ));
        }

        let classification = self.classifier.classify(question, self.cfg.faq_top_k).await?;
        let tier = classification.tier;
        info!(
            target: "chat_core::pipeline",
            "classified: tier={tier:?} best={:.3}",
            classification.best_similarity
        );

        // Strong matches skip the general search; medium/low over-fetch and
        // drop FAQ-tagged records so both sources stay disjoint.
        let doc_matches = if tier == MatchTier::High {
            Vec::new()
        } else {
            let mut docs = self.retriever.retrieve(question, 0.0, top_k * 2).await?;
            docs.retain(|m| !m.is_faq);
            docs.truncate(top_k);
            docs
        };

        let bundle = compose(tier, &classification.faq_matches, &doc_matches);

        if bundle.passages.is_empty() {
            return Ok(QueryResult {
                answer: NO_RELEVANT_ANSWER.to_string(),
                match_tier: tier,
                context_kind: None,
                best_faq_similarity: classification.best_similarity,
                relevant_documents: Vec::new(),
                error: Some("No relevant documents found".to_string()),
            });
        }

        let generated = self
            .generator
            .generate(question, &bundle.passages, bundle.temperature, bundle.kind)
            .await;

        match generated {
            Ok(answer) => {
                let mut relevant_documents = Vec::new();
                for m in classification.faq_matches.iter().take(3) {
                    relevant_documents.push(RelevantDoc {
                        filename: m.filename.clone(),
                        similarity: m.similarity,
                        kind: DocKind::Faq,
                        preview: clamp_preview(&m.content, PREVIEW_CHARS),
                    });
                }
                for m in doc_matches.iter().take(3) {
                    relevant_documents.push(RelevantDoc {
                        filename: m.filename.clone(),
                        similarity: m.similarity,
                        kind: DocKind::Document,
                        preview: clamp_preview(&m.content, PREVIEW_CHARS),
                    });
                }

                Ok(QueryResult {
                    answer,
                    match_tier: tier,
                    context_kind: Some(bundle.kind),
                    best_faq_similarity: classification.best_similarity,
                    relevant_documents,
                    error: None,
                })
            }
            Err(err) => {
                // Generation flakiness is steady-state; degrade, never crash.
                warn!(target: "chat_core::pipeline", "generation failed: {err}");
                Ok(QueryResult {
                    answer: GENERATION_FAILED_ANSWER.to_string(),
                    match_tier: tier,
                    context_kind: Some(bundle.kind),
                    best_faq_similarity: classification.best_similarity,
                    relevant_documents: Vec::new(),
                    error: Some(format!("Generation failed: {err}")),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubEmbedder, StubGenerator, StubIndex, sm};
    use crate::types::ContextKind;

    fn pipeline(
        index: Arc<StubIndex>,
        generator: Arc<StubGenerator>,
    ) -> QueryPipeline {
        QueryPipeline::new(
            index,
            Arc::new(StubEmbedder::default()),
            generator,
            ChatConfig::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn strong_faq_match_answers_from_faq_alone() {
        let index = Arc::new(StubIndex::with_matches(vec![
            sm("faq/becas.md", 0.82, true),
            sm("faq/inscripcion.md", 0.72, true),
            sm("faq/horarios.md", 0.70, true),
            sm("faq/pagos.md", 0.68, true),
            sm("reglamento.md", 0.80, false),
        ]));
        let generator = Arc::new(StubGenerator::new());
        let p = pipeline(Arc::clone(&index), Arc::clone(&generator));

        let res = p.answer("How do I apply for a scholarship?", 4).await.unwrap();

        assert_eq!(res.match_tier, MatchTier::High);
        assert_eq!(res.context_kind, Some(ContextKind::FaqOnly));
        assert_eq!(res.best_faq_similarity, 0.82);
        assert!(res.error.is_none());

        // One search from classification, none from the skipped doc stage.
        assert_eq!(index.searches(), 1);

        let calls = generator.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].temperature, 0.1);
        assert_eq!(calls[0].passages.len(), 3);
        assert!(calls[0].passages[0].contains("faq/becas.md"));
    }

    #[tokio::test]
    async fn medium_match_blends_faq_and_documents() {
        let index = Arc::new(StubIndex::with_matches(vec![
            sm("faq/a.md", 0.70, true),
            sm("faq/b.md", 0.66, true),
            sm("guide.md", 0.68, false),
            sm("rules.md", 0.64, false),
        ]));
        let generator = Arc::new(StubGenerator::new());
        let p = pipeline(Arc::clone(&index), Arc::clone(&generator));

        let res = p.answer("enrollment process?", 4).await.unwrap();

        assert_eq!(res.match_tier, MatchTier::Medium);
        assert_eq!(res.context_kind, Some(ContextKind::FaqAndDocs));
        assert_eq!(index.searches(), 2);

        let calls = generator.calls.lock().unwrap();
        assert_eq!(calls[0].temperature, 0.2);
        assert_eq!(calls[0].passages.len(), 4);
        // FAQ passages precede document passages.
        assert!(calls[0].passages[0].contains("faq/a.md"));
        assert!(calls[0].passages[2].contains("guide.md"));
    }

    #[tokio::test]
    async fn no_faq_match_falls_back_to_documents() {
        let index = Arc::new(StubIndex::with_matches(vec![
            sm("intro.md", 0.60, false),
            sm("guide.md", 0.55, false),
            sm("rules.md", 0.50, false),
        ]));
        let generator = Arc::new(StubGenerator::new());
        let p = pipeline(Arc::clone(&index), Arc::clone(&generator));

        let res = p.answer("general question", 4).await.unwrap();

        assert_eq!(res.match_tier, MatchTier::Low);
        assert_eq!(res.context_kind, Some(ContextKind::DocsOnly));
        assert_eq!(res.best_faq_similarity, 0.0);

        let calls = generator.calls.lock().unwrap();
        assert_eq!(calls[0].temperature, 0.3);
        assert_eq!(calls[0].passages.len(), 3);
    }

    #[tokio::test]
    async fn empty_corpus_short_circuits_without_generation() {
        let index = Arc::new(StubIndex::empty());
        let generator = Arc::new(StubGenerator::new());
        let p = pipeline(index, Arc::clone(&generator));

        let res = p.answer("anything", 4).await.unwrap();

        assert_eq!(res.answer, NO_DOCUMENTS_ANSWER);
        assert_eq!(res.error.as_deref(), Some("No documents in database"));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn empty_bundle_is_terminal_without_generation() {
        // One record so the corpus is non-empty, but nothing survives the
        // medium threshold and the record is FAQ-tagged so the doc stage
        // drops it too.
        let index = Arc::new(StubIndex::with_matches(vec![sm("faq/a.md", 0.3, true)]));
        let generator = Arc::new(StubGenerator::new());
        let p = pipeline(index, Arc::clone(&generator));

        let res = p.answer("unrelated question", 4).await.unwrap();

        assert_eq!(res.answer, NO_RELEVANT_ANSWER);
        assert_eq!(res.error.as_deref(), Some("No relevant documents found"));
        assert!(res.context_kind.is_none());
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn generation_failure_degrades_into_result() {
        let index = Arc::new(StubIndex::with_matches(vec![sm("faq/a.md", 0.9, true)]));
        let generator = Arc::new(StubGenerator::failing());
        let p = pipeline(index, Arc::clone(&generator));

        let res = p.answer("question", 4).await.unwrap();

        assert_eq!(res.answer, GENERATION_FAILED_ANSWER);
        assert!(res.error.as_deref().unwrap().starts_with("Generation failed"));
        assert_eq!(res.match_tier, MatchTier::High);
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn provenance_carries_previews_and_kinds() {
        let index = Arc::new(StubIndex::with_matches(vec![
            sm("faq/a.md", 0.70, true),
            sm("guide.md", 0.68, false),
        ]));
        let generator = Arc::new(StubGenerator::new());
        let p = pipeline(index, Arc::clone(&generator));

        let res = p.answer("question", 4).await.unwrap();

        assert_eq!(res.relevant_documents.len(), 2);
        assert_eq!(res.relevant_documents[0].kind, DocKind::Faq);
        assert_eq!(res.relevant_documents[1].kind, DocKind::Document);
        assert!(res.relevant_documents[0].preview.contains("faq/a.md"));
    }
}
