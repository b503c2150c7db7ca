//! Result assembly: pure aggregation, no I/O.

use ecall_core::Transcript;

use crate::pipeline::Variant;
use crate::types::{AnalyticsResult, ChunkSentiment, EntitySpan, SentimentResult};

/// Decimal places kept on the advanced intro sentiment score.
pub const INTRO_SCORE_DECIMALS: u32 = 4;

/// Round `value` to `decimals` places.
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    (value * factor).round() / factor
}

/// Builds the final [`AnalyticsResult`] for one transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultAssembler {
    variant: Variant,
    intro_score_decimals: u32,
}

impl ResultAssembler {
    #[must_use]
    pub fn new(variant: Variant, intro_score_decimals: u32) -> Self {
        Self {
            variant,
            intro_score_decimals,
        }
    }

    /// Assembler for the advanced payload (intro score to 4 places).
    #[must_use]
    pub fn advanced() -> Self {
        Self::new(Variant::Advanced, INTRO_SCORE_DECIMALS)
    }

    /// Combine the analysis outputs with transcript metadata.
    ///
    /// Word count is taken over whitespace-delimited words of the full text.
    #[must_use]
    pub fn assemble(
        &self,
        transcript: &Transcript,
        intro: SentimentResult,
        segments: Vec<ChunkSentiment>,
        key_phrases: Vec<EntitySpan>,
        elapsed_ms: u64,
    ) -> AnalyticsResult {
        AnalyticsResult {
            call_id: transcript.call_id.clone(),
            company: transcript.company().to_string(),
            date: transcript.call_date().to_string(),
            variant: self.variant,
            intro_sentiment: SentimentResult {
                score: round_to(intro.score, self.intro_score_decimals),
                label: intro.label,
            },
            segments,
            key_phrases,
            word_count: transcript.word_count(),
            processing_time_ms: elapsed_ms,
        }
    }
}
