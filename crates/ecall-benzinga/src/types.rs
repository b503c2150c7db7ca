//! Response shapes for the `transcripts/calls/{id}` endpoint.
//!
//! Only the fields the analytics pipeline reads are modelled; everything else
//! in the payload is ignored.

use ecall_core::{Transcript, TranscriptMetadata};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CallResponse {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub transcripts: Vec<TranscriptEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptEntry {
    #[serde(default)]
    pub text: Option<String>,
}

impl CallResponse {
    /// Builds a [`Transcript`] from the first transcript entry.
    ///
    /// Returns `None` when there is no entry or its text is missing or empty.
    /// Whitespace-only text is passed through; the pipeline treats it as a
    /// blank transcript.
    #[must_use]
    pub fn into_transcript(self, call_id: &str) -> Option<Transcript> {
        let text = self
            .transcripts
            .into_iter()
            .next()
            .and_then(|entry| entry.text)
            .filter(|text| !text.is_empty())?;

        Some(Transcript::new(
            call_id,
            text,
            TranscriptMetadata {
                symbol: self.symbol,
                start_time: self.start_time,
            },
        ))
    }
}
