//! Token counting under a reference model vocabulary.

use std::path::Path;

use tokenizers::Tokenizer;

use crate::error::AnalysisError;

/// Returns the number of tokens a sentence occupies under some vocabulary.
///
/// Used only for sizing decisions; the counted tokens are never kept.
pub trait TokenCounter: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AnalysisError::Upstream`] if the tokenizer rejects the input.
    fn count(&self, text: &str) -> Result<usize, AnalysisError>;
}

/// Counts tokens with a Hugging Face `tokenizer.json`, excluding special tokens.
pub struct HfTokenCounter {
    tokenizer: Tokenizer,
}

impl HfTokenCounter {
    /// Wraps `tokenizer` with its padding and truncation switched off, so the
    /// count is the sentence's real length whatever the file configures.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Configuration`] if truncation cannot be cleared.
    pub fn new(mut tokenizer: Tokenizer) -> Result<Self, AnalysisError> {
        tokenizer.with_padding(None);
        tokenizer.with_truncation(None).map_err(|e| {
            AnalysisError::Configuration(format!("failed to disable tokenizer truncation: {e}"))
        })?;
        Ok(Self { tokenizer })
    }

    /// Load the tokenizer once from a `tokenizer.json` file.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Configuration`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        let tokenizer = Tokenizer::from_file(path).map_err(|e| {
            AnalysisError::Configuration(format!(
                "failed to load tokenizer from {}: {e}",
                path.display()
            ))
        })?;
        Self::new(tokenizer)
    }
}

impl TokenCounter for HfTokenCounter {
    fn count(&self, text: &str) -> Result<usize, AnalysisError> {
        self.tokenizer
            .encode(text, false)
            .map(|encoding| encoding.len())
            .map_err(|e| AnalysisError::upstream("tokenizer", e.to_string()))
    }
}

/// Counts whitespace-delimited words.
///
/// Fallback when no reference tokenizer is configured; subword vocabularies
/// produce more tokens than words, so chunks sized this way run larger.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenCounter;

impl TokenCounter for WhitespaceTokenCounter {
    fn count(&self, text: &str) -> Result<usize, AnalysisError> {
        Ok(text.split_whitespace().count())
    }
}
