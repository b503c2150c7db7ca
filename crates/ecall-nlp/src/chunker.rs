//! Token-aware greedy chunking.

use std::sync::Arc;

use crate::error::AnalysisError;
use crate::sentence::SentenceTokenizer;
use crate::tokens::TokenCounter;

/// Delimiter placed between sentences when a chunk's text is rendered.
pub const SENTENCE_SEPARATOR: &str = " ";

/// Consecutive sentences whose combined token count fits the chunk limit.
///
/// A single sentence larger than the limit forms its own oversized chunk;
/// sentences are never split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    sentences: Vec<String>,
    token_count: usize,
}

impl Chunk {
    #[must_use]
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    #[must_use]
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    /// Sentences joined with a single space.
    #[must_use]
    pub fn text(&self) -> String {
        self.sentences.join(SENTENCE_SEPARATOR)
    }
}

/// Groups sentences into maximal chunks under a token budget, in order.
#[derive(Clone)]
pub struct Chunker {
    sentences: Arc<dyn SentenceTokenizer>,
    tokens: Arc<dyn TokenCounter>,
}

impl Chunker {
    #[must_use]
    pub fn new(sentences: Arc<dyn SentenceTokenizer>, tokens: Arc<dyn TokenCounter>) -> Self {
        Self { sentences, tokens }
    }

    /// Split `text` into chunks of at most `token_limit` tokens each.
    ///
    /// Greedy: a sentence joins the open chunk while the running total stays
    /// within the limit, otherwise the open chunk is sealed and the sentence
    /// starts the next one. Empty text yields no chunks.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::Configuration`] if `token_limit` is zero.
    /// - [`AnalysisError::Upstream`] if the token counter fails.
    pub fn chunk(&self, text: &str, token_limit: usize) -> Result<Vec<Chunk>, AnalysisError> {
        if token_limit == 0 {
            return Err(AnalysisError::Configuration(
                "chunk token limit must be greater than zero".to_string(),
            ));
        }

        let mut chunks = Vec::new();
        let mut current: Vec<String> = Vec::new();
        let mut current_tokens = 0usize;

        for sentence in self.sentences.split(text) {
            let sentence_tokens = self.tokens.count(&sentence)?;

            if current_tokens.saturating_add(sentence_tokens) <= token_limit {
                current.push(sentence);
                current_tokens += sentence_tokens;
            } else {
                if !current.is_empty() {
                    chunks.push(Chunk {
                        sentences: std::mem::take(&mut current),
                        token_count: current_tokens,
                    });
                }
                if sentence_tokens > token_limit {
                    tracing::debug!(
                        tokens = sentence_tokens,
                        limit = token_limit,
                        "sentence exceeds chunk limit; keeping it as its own chunk"
                    );
                }
                current.push(sentence);
                current_tokens = sentence_tokens;
            }
        }

        if !current.is_empty() {
            chunks.push(Chunk {
                sentences: current,
                token_count: current_tokens,
            });
        }

        Ok(chunks)
    }
}
