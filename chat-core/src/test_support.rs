//! In-memory stubs for the external ports, used across unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use doc_store::{BoxFuture, DocumentRecord, ScoredMatch, StoreError, VectorIndex};
use llm_service::config::llm_provider::LlmProvider;
use llm_service::error_handler::{ProviderError, ProviderErrorKind};
use llm_service::LlmServiceError;

use crate::generation::GenerationPort;
use crate::types::ContextKind;

/// Shorthand for building a scored match whose content names its file.
pub fn sm(filename: &str, similarity: f32, is_faq: bool) -> ScoredMatch {
    ScoredMatch {
        filename: filename.into(),
        content: format!("content of {filename}"),
        similarity,
        is_faq,
    }
}

/// Vector index stub returning a canned result set and counting searches.
pub struct StubIndex {
    matches: Vec<ScoredMatch>,
    count: u64,
    search_calls: AtomicUsize,
}

impl StubIndex {
    pub fn with_matches(matches: Vec<ScoredMatch>) -> Self {
        let count = matches.len() as u64;
        Self {
            matches,
            count,
            search_calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::with_matches(Vec::new())
    }

    pub fn searches(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

impl VectorIndex for StubIndex {
    fn search(
        &self,
        _vector: Vec<f32>,
        limit: u64,
    ) -> BoxFuture<'_, Result<Vec<ScoredMatch>, StoreError>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let mut out = self.matches.clone();
        out.truncate(limit as usize);
        Box::pin(async move { Ok(out) })
    }

    fn insert(&self, _record: DocumentRecord) -> BoxFuture<'_, Result<(), StoreError>> {
        Box::pin(async { Ok(()) })
    }

    fn count(&self) -> BoxFuture<'_, Result<u64, StoreError>> {
        let n = self.count;
        Box::pin(async move { Ok(n) })
    }

    fn delete_all(&self) -> BoxFuture<'_, Result<u64, StoreError>> {
        let n = self.count;
        Box::pin(async move { Ok(n) })
    }

    fn exists<'a>(&'a self, _filename: &'a str) -> BoxFuture<'a, Result<bool, StoreError>> {
        Box::pin(async { Ok(false) })
    }
}

/// Embedder stub producing a fixed small vector.
#[derive(Default)]
pub struct StubEmbedder;

impl doc_store::EmbeddingsProvider for StubEmbedder {
    fn embed<'a>(&'a self, _text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, StoreError>> {
        Box::pin(async { Ok(vec![0.1, 0.2, 0.3, 0.4]) })
    }

    fn dim(&self) -> Option<usize> {
        Some(4)
    }
}

/// One recorded generation call.
#[derive(Clone, Debug)]
pub struct GenCall {
    pub passages: Vec<String>,
    pub temperature: f32,
    pub kind: ContextKind,
}

/// Generation stub recording every call; can be switched to fail.
pub struct StubGenerator {
    pub calls: Mutex<Vec<GenCall>>,
    pub simple_calls: Mutex<Vec<String>>,
    fail: bool,
}

impl StubGenerator {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            simple_calls: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl GenerationPort for StubGenerator {
    fn generate<'a>(
        &'a self,
        _query: &'a str,
        passages: &'a [String],
        temperature: f32,
        kind: ContextKind,
    ) -> BoxFuture<'a, Result<String, LlmServiceError>> {
        self.calls.lock().unwrap().push(GenCall {
            passages: passages.to_vec(),
            temperature,
            kind,
        });
        let fail = self.fail;
        Box::pin(async move {
            if fail {
                Err(ProviderError::new(LlmProvider::Groq, ProviderErrorKind::EmptyChoices).into())
            } else {
                Ok("stubbed answer".to_string())
            }
        })
    }

    fn simple_chat<'a>(
        &'a self,
        message: &'a str,
        _temperature: f32,
    ) -> BoxFuture<'a, Result<String, LlmServiceError>> {
        self.simple_calls.lock().unwrap().push(message.to_string());
        let fail = self.fail;
        Box::pin(async move {
            if fail {
                Err(ProviderError::new(LlmProvider::Groq, ProviderErrorKind::EmptyChoices).into())
            } else {
                Ok("plain answer".to_string())
            }
        })
    }

    fn model_name(&self) -> &str {
        "stub-model"
    }
}
