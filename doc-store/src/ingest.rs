//! Markdown ingestion: discovery, cleaning, chunking and indexing.
//!
//! Walks a docs folder recursively, tags files under `faq/` as FAQ entries,
//! splits long documents into overlapping chunks and writes everything into
//! the vector index through the [`VectorIndex`] port.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::embed::EmbeddingsProvider;
use crate::errors::StoreError;
use crate::index::VectorIndex;
use crate::record::DocumentRecord;

/// Maximum chunk length in characters.
const CHUNK_SIZE: usize = 1000;
/// Overlap carried between consecutive chunks.
const CHUNK_OVERLAP: usize = 200;

/// Options controlling an ingestion run.
#[derive(Clone, Debug)]
pub struct IngestOptions {
    /// Split documents longer than the chunk size.
    pub chunk_documents: bool,
    /// Skip files whose records are already stored.
    pub skip_existing: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            chunk_documents: true,
            skip_existing: true,
        }
    }
}

/// Summary of an ingestion run.
#[derive(Clone, Copy, Debug, Default)]
pub struct IngestStats {
    /// Records written to the index.
    pub processed: usize,
    /// Files skipped (already present or unreadable).
    pub skipped: usize,
    /// Markdown files discovered.
    pub total: usize,
}

/// Recursively discovers `.md` files under `root`.
///
/// Returned paths are relative to `root` and sorted for deterministic runs.
pub fn discover_markdown(root: &Path) -> Result<Vec<PathBuf>, StoreError> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().and_then(|e| e.to_str()) == Some("md") {
                if let Ok(rel) = path.strip_prefix(root) {
                    out.push(rel.to_path_buf());
                }
            }
        }
    }
    out.sort();
    Ok(out)
}

/// Normalizes raw markdown text before embedding.
///
/// Collapses runs of blank lines and trims trailing whitespace per line.
pub fn clean_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut blank_run = 0usize;
    for line in raw.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim().to_string()
}

/// Splits text into overlapping chunks of at most [`CHUNK_SIZE`] characters.
///
/// Prefers to break at a paragraph or sentence boundary in the second half of
/// the window so chunks do not cut mid-sentence. Consecutive chunks share
/// [`CHUNK_OVERLAP`] characters of context.
pub fn chunk_text(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= CHUNK_SIZE {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0usize;
    while start < chars.len() {
        let mut end = (start + CHUNK_SIZE).min(chars.len());

        if end < chars.len() {
            // Look backwards for a natural break, but never past mid-window.
            // Break positions are char indices so a break is always deeper
            // than the overlap and the window always advances.
            if let Some(cut) = last_break(&chars[start..end], CHUNK_SIZE / 2) {
                end = start + cut;
            }
        }

        let chunk: String = chars[start..end].iter().collect();
        let chunk = chunk.trim().to_string();
        if !chunk.is_empty() {
            chunks.push(chunk);
        }

        if end >= chars.len() {
            break;
        }
        start = end.saturating_sub(CHUNK_OVERLAP);
    }
    chunks
}

/// Char index just past the last paragraph (preferred) or sentence break in
/// `window`, ignoring breaks at or before `min`.
fn last_break(window: &[char], min: usize) -> Option<usize> {
    let upper = window.len().saturating_sub(1);
    let rscan = |a: char, b: char| {
        (min + 1..upper)
            .rev()
            .find(|&i| window[i] == a && window[i + 1] == b)
    };
    rscan('\n', '\n').or_else(|| rscan('.', ' ')).map(|i| i + 1)
}

/// Ingests every markdown file under `docs_dir` into the index.
///
/// Files in the `faq/` subfolder are tagged `is_faq = true`; the tag is
/// decided here, once, and persisted with each record. Unreadable files are
/// logged and skipped rather than aborting the run.
pub async fn ingest_dir(
    index: &dyn VectorIndex,
    embedder: &dyn EmbeddingsProvider,
    docs_dir: &Path,
    opts: &IngestOptions,
) -> Result<IngestStats, StoreError> {
    let files = discover_markdown(docs_dir)?;
    let mut stats = IngestStats {
        total: files.len(),
        ..Default::default()
    };
    info!("Discovered {} markdown files in {:?}", files.len(), docs_dir);

    for rel in &files {
        let filename = rel.to_string_lossy().replace('\\', "/");
        let is_faq = filename.starts_with("faq/");

        if opts.skip_existing && index.exists(&filename).await? {
            stats.skipped += 1;
            continue;
        }

        let raw = match fs::read_to_string(docs_dir.join(rel)) {
            Ok(s) => s,
            Err(err) => {
                warn!("Skipping unreadable file {}: {}", filename, err);
                stats.skipped += 1;
                continue;
            }
        };

        let cleaned = clean_text(&raw);
        if cleaned.is_empty() {
            warn!("Skipping empty file {}", filename);
            stats.skipped += 1;
            continue;
        }

        let parts = if opts.chunk_documents {
            chunk_text(&cleaned)
        } else {
            vec![cleaned]
        };
        let chunked = parts.len() > 1;

        for (i, content) in parts.into_iter().enumerate() {
            let name = if chunked {
                format!("{}_chunk_{}", filename, i)
            } else {
                filename.clone()
            };
            let embedding = embedder.embed(&content).await?;
            index
                .insert(DocumentRecord {
                    filename: name,
                    content,
                    embedding,
                    is_faq,
                })
                .await?;
            stats.processed += 1;
        }
    }

    info!(
        "Ingestion finished: processed={} skipped={} total={}",
        stats.processed, stats.skipped, stats.total
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_collapses_blank_runs() {
        let raw = "# Title  \n\n\n\nBody line\n\n\nMore\n";
        let cleaned = clean_text(raw);
        assert_eq!(cleaned, "# Title\n\nBody line\n\nMore");
    }

    #[test]
    fn short_text_stays_whole() {
        let chunks = chunk_text("just a short note");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], "just a short note");
    }

    #[test]
    fn long_text_is_split_with_overlap() {
        let para = "Lorem ipsum dolor sit amet. ".repeat(20);
        let text = format!("{}\n\n{}\n\n{}", para, para, para);
        let chunks = chunk_text(&text);
        assert!(chunks.len() > 1);
        for c in &chunks {
            assert!(c.chars().count() <= CHUNK_SIZE);
        }
        // Consecutive chunks share trailing/leading context.
        let tail: String = chunks[0]
            .chars()
            .rev()
            .take(50)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        assert!(chunks[1].contains(tail.trim()));
    }

    #[test]
    fn multibyte_text_with_early_break_terminates() {
        // A paragraph break in the first half of the window must be ignored;
        // with multibyte chars a byte-offset scan used to pick it anyway and
        // stall the window.
        let text = format!("{}\n\n{}", "あ".repeat(170), "い".repeat(2000));
        let chunks = chunk_text(&text);
        assert!(chunks.len() > 1);
        for c in &chunks {
            assert!(c.chars().count() <= CHUNK_SIZE);
        }
    }

    #[test]
    fn break_scan_counts_chars_not_bytes() {
        let text = format!("{}. {}", "あ".repeat(600), "い".repeat(1000));
        let chunks = chunk_text(&text);
        assert!(chunks.len() > 1);
        assert!(chunks[0].ends_with('.'));
    }

    #[test]
    fn chunks_prefer_sentence_breaks() {
        let text = "A sentence. ".repeat(200);
        let chunks = chunk_text(&text);
        assert!(chunks.len() > 1);
        assert!(chunks[0].ends_with('.'));
    }
}
