//! Earnings-call transcript as fetched from the transcript provider.

use serde::{Deserialize, Serialize};

/// Placeholder used when a metadata field is absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// Identifying metadata attached to a transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptMetadata {
    /// Ticker symbol of the reporting company.
    pub symbol: Option<String>,
    /// Call start timestamp, e.g. `2024-07-25T16:30:00-04:00`.
    pub start_time: Option<String>,
}

/// Full text of one earnings call plus its metadata.
///
/// Owned by the request that fetched it and dropped once the analytics
/// payload has been built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub call_id: String,
    pub text: String,
    pub metadata: TranscriptMetadata,
}

impl Transcript {
    #[must_use]
    pub fn new(
        call_id: impl Into<String>,
        text: impl Into<String>,
        metadata: TranscriptMetadata,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            text: text.into(),
            metadata,
        }
    }

    /// Number of whitespace-delimited words in the text.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Company symbol, or `"N/A"` when the provider omitted it.
    #[must_use]
    pub fn company(&self) -> &str {
        self.metadata.symbol.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Calendar date of the call: the start timestamp up to the first `T`.
    ///
    /// Falls back to `"N/A"` when the timestamp is absent.
    #[must_use]
    pub fn call_date(&self) -> &str {
        match self.metadata.start_time.as_deref() {
            Some(ts) => ts.split('T').next().unwrap_or(ts),
            None => NOT_AVAILABLE,
        }
    }

    /// Returns `true` when the text is empty or whitespace only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
