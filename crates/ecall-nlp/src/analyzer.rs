//! Per-segment sentiment analysis.

use crate::capabilities::SentimentClassifier;
use crate::chunker::Chunker;
use crate::error::AnalysisError;
use crate::sentence::SentenceTokenizer;
use crate::types::ChunkSentiment;
use crate::CLASSIFIER_MAX_INPUT_CHARS;

/// Cut `text` to the classifier's input window, on a character boundary.
#[must_use]
pub fn truncate_for_classifier(text: &str) -> &str {
    match text.char_indices().nth(CLASSIFIER_MAX_INPUT_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Chunk `text` and classify each chunk in order, numbering from 1.
///
/// The classifier sees at most [`CLASSIFIER_MAX_INPUT_CHARS`] characters of
/// each chunk; the returned record carries the full chunk text. One classifier
/// call per chunk, no retries: the first failure aborts the whole analysis.
///
/// # Errors
///
/// - [`AnalysisError::Configuration`] if `token_limit` is zero.
/// - [`AnalysisError::Upstream`] if token counting or classification fails.
pub async fn analyze_by_chunk<S: SentimentClassifier>(
    chunker: &Chunker,
    classifier: &S,
    text: &str,
    token_limit: usize,
) -> Result<Vec<ChunkSentiment>, AnalysisError> {
    let chunks = chunker.chunk(text, token_limit)?;
    let mut results = Vec::with_capacity(chunks.len());

    for (idx, chunk) in chunks.into_iter().enumerate() {
        let chunk_number = idx + 1;
        let text = chunk.text();
        let sentiment = classifier.classify(truncate_for_classifier(&text)).await?;
        tracing::debug!(
            chunk_number,
            tokens = chunk.token_count(),
            label = %sentiment.label,
            "classified chunk"
        );
        results.push(ChunkSentiment {
            chunk_number,
            text,
            sentiment,
        });
    }

    Ok(results)
}

/// Classify the first `max_sentences` sentences of `text` one by one.
///
/// # Errors
///
/// Returns [`AnalysisError::Upstream`] if any classification fails.
pub async fn analyze_by_sentence<S: SentimentClassifier>(
    sentences: &dyn SentenceTokenizer,
    classifier: &S,
    text: &str,
    max_sentences: usize,
) -> Result<Vec<ChunkSentiment>, AnalysisError> {
    let mut results = Vec::new();

    for (idx, sentence) in sentences.split(text).into_iter().take(max_sentences).enumerate() {
        let sentiment = classifier
            .classify(truncate_for_classifier(&sentence))
            .await?;
        results.push(ChunkSentiment {
            chunk_number: idx + 1,
            text: sentence,
            sentiment,
        });
    }

    Ok(results)
}
