//! Chat sessions and the explicit session registry.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::error::Result;
use crate::history::{ConversationHistory, ConversationTurn};
use crate::pipeline::QueryPipeline;
use crate::types::{MatchTier, QueryResult};

/// Answer for blank input; the turn is not recorded.
pub const EMPTY_MESSAGE_ANSWER: &str = "Please type a message.";

/// Per-call knobs for [`ChatSession::chat`].
#[derive(Clone, Copy, Debug)]
pub struct ChatOptions {
    /// Passages retrieved per source on the retrieval path.
    pub top_k: usize,
    /// Sampling temperature for the retrieval-free path. The retrieval path
    /// derives its temperature from the match tier instead.
    pub temperature: f32,
    /// Toggles the retrieval pipeline; off means history-only chat.
    pub use_rag: bool,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            top_k: 4,
            temperature: 0.7,
            use_rag: true,
        }
    }
}

/// One user's conversation against the shared pipeline.
///
/// Owns its history exclusively; nothing from another session can reach a
/// context bundle built here. Callers racing on the same session should
/// serialize access themselves (the registry wraps sessions in a mutex).
pub struct ChatSession {
    pipeline: Arc<QueryPipeline>,
    history: ConversationHistory,
}

impl ChatSession {
    pub fn new(pipeline: Arc<QueryPipeline>) -> Self {
        let capacity = pipeline.config().max_history;
        Self {
            pipeline,
            history: ConversationHistory::new(capacity),
        }
    }

    /// Processes one user message and records the exchanged turn.
    ///
    /// Blank input is rejected without touching the history. Every other
    /// outcome, including degraded generation results, is appended so the
    /// user sees it in their transcript.
    pub async fn chat(&mut self, user_message: &str, opts: ChatOptions) -> Result<QueryResult> {
        if user_message.trim().is_empty() {
            return Ok(QueryResult::terminal(
                EMPTY_MESSAGE_ANSWER,
                MatchTier::Low,
                "Empty message",
            ));
        }

        let result = if opts.use_rag {
            self.pipeline.answer(user_message, opts.top_k).await?
        } else {
            self.plain_turn(user_message, opts.temperature).await
        };

        self.history.append(ConversationTurn {
            user_message: user_message.to_string(),
            assistant_message: result.answer.clone(),
        });

        Ok(result)
    }

    /// History-only path: render the transcript, prepend it to the message
    /// and call the generator with no retrieved passages.
    async fn plain_turn(&self, user_message: &str, temperature: f32) -> QueryResult {
        let full_message = format!("{}User: {}", self.history.render(), user_message);

        match self.pipeline.plain_chat(&full_message, temperature).await {
            Ok(answer) => QueryResult {
                answer,
                match_tier: MatchTier::Low,
                context_kind: None,
                best_faq_similarity: 0.0,
                relevant_documents: Vec::new(),
                error: None,
            },
            Err(err) => QueryResult::terminal(
                format!("An error occurred while generating the answer: {err}"),
                MatchTier::Low,
                err.to_string(),
            ),
        }
    }

    pub fn history(&self) -> Vec<ConversationTurn> {
        self.history.history()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn max_history(&self) -> usize {
        self.history.capacity()
    }

    pub fn set_max_history(&mut self, n: usize) {
        self.history.set_capacity(n);
    }
}

/// Explicit registry of live sessions keyed by session id.
///
/// Sessions are created on first use and removed on explicit close. Each
/// session is guarded by its own mutex so concurrent queries on different
/// sessions never interleave history mutations.
pub struct SessionRegistry {
    pipeline: Arc<QueryPipeline>,
    sessions: RwLock<HashMap<String, Arc<Mutex<ChatSession>>>>,
}

impl SessionRegistry {
    pub fn new(pipeline: Arc<QueryPipeline>) -> Self {
        Self {
            pipeline,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn pipeline(&self) -> &Arc<QueryPipeline> {
        &self.pipeline
    }

    /// Returns the session for `id`, creating it on first use.
    pub async fn get_or_create(&self, id: &str) -> Arc<Mutex<ChatSession>> {
        if let Some(s) = self.sessions.read().await.get(id) {
            return Arc::clone(s);
        }

        let mut guard = self.sessions.write().await;
        // Re-check under the write lock; another task may have won the race.
        if let Some(s) = guard.get(id) {
            return Arc::clone(s);
        }
        info!(target: "chat_core::session", "creating session '{id}'");
        let session = Arc::new(Mutex::new(ChatSession::new(Arc::clone(&self.pipeline))));
        guard.insert(id.to_string(), Arc::clone(&session));
        session
    }

    /// Removes a session; returns whether it existed.
    pub async fn close(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn list(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.sessions.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
