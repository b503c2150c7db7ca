//! One analysis pipeline, parameterized by profile.
//!
//! The basic and advanced analytics endpoints differ only in how they
//! segment text for sentiment, how they post-process entities, the intro
//! score precision, and output field naming. [`PipelineProfile`] captures
//! those choices so both run through the same flow.

use std::sync::Arc;
use std::time::Instant;

use ecall_core::Transcript;

use crate::analyzer::{analyze_by_chunk, analyze_by_sentence, truncate_for_classifier};
use crate::assemble::{ResultAssembler, INTRO_SCORE_DECIMALS};
use crate::capabilities::{EntityExtractor, SentimentClassifier};
use crate::chunker::Chunker;
use crate::error::AnalysisError;
use crate::filter::{filter_entities, select_key_phrases, KEY_PHRASE_GROUPS};
use crate::sentence::SentenceTokenizer;
use crate::tokens::TokenCounter;
use crate::types::{AnalyticsResult, ChunkSentiment, EntitySpan, SentimentResult};

/// Sentences classified by the basic profile.
pub const BASIC_MAX_SENTENCES: usize = 50;

/// Key phrases returned by the basic profile.
pub const BASIC_MAX_KEY_PHRASES: usize = 10;

/// Decimal places kept on the basic intro sentiment score.
pub const BASIC_INTRO_SCORE_DECIMALS: u32 = 2;

/// Which payload shape a pipeline produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Basic,
    Advanced,
}

impl Variant {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Basic => "basic",
            Variant::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How text is split into segments for sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segmentation {
    /// One segment per sentence, first `max_sentences` only.
    Sentences { max_sentences: usize },
    /// Greedy token-bounded chunks.
    TokenChunks { token_limit: usize },
}

/// How raw entities become key phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityPolicy {
    /// Keep listed groups, deduplicate, cap the count.
    KeyPhrases {
        groups: &'static [&'static str],
        max_phrases: usize,
    },
    /// Drop punctuation and non-alphanumeric spans; keep order and duplicates.
    Filtered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineProfile {
    pub variant: Variant,
    pub segmentation: Segmentation,
    pub entities: EntityPolicy,
    pub intro_score_decimals: u32,
}

impl PipelineProfile {
    /// Per-sentence sentiment, deduplicated ORG/PER/MISC key phrases.
    #[must_use]
    pub fn basic() -> Self {
        Self {
            variant: Variant::Basic,
            segmentation: Segmentation::Sentences {
                max_sentences: BASIC_MAX_SENTENCES,
            },
            entities: EntityPolicy::KeyPhrases {
                groups: &KEY_PHRASE_GROUPS,
                max_phrases: BASIC_MAX_KEY_PHRASES,
            },
            intro_score_decimals: BASIC_INTRO_SCORE_DECIMALS,
        }
    }

    /// Token-chunked sentiment and filtered entities.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Configuration`] if `token_limit` is zero.
    pub fn advanced(token_limit: usize) -> Result<Self, AnalysisError> {
        if token_limit == 0 {
            return Err(AnalysisError::Configuration(
                "chunk token limit must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            variant: Variant::Advanced,
            segmentation: Segmentation::TokenChunks { token_limit },
            entities: EntityPolicy::Filtered,
            intro_score_decimals: INTRO_SCORE_DECIMALS,
        })
    }
}

/// Runs one transcript through segmentation, sentiment, NER and assembly.
///
/// Every step runs sequentially on the caller's task; capability handles are
/// shared, everything else is built fresh per call.
pub struct AnalysisPipeline<S, E> {
    profile: PipelineProfile,
    sentences: Arc<dyn SentenceTokenizer>,
    chunker: Chunker,
    classifier: S,
    extractor: E,
    assembler: ResultAssembler,
}

impl<S: SentimentClassifier, E: EntityExtractor> AnalysisPipeline<S, E> {
    #[must_use]
    pub fn new(
        profile: PipelineProfile,
        sentences: Arc<dyn SentenceTokenizer>,
        tokens: Arc<dyn TokenCounter>,
        classifier: S,
        extractor: E,
    ) -> Self {
        let chunker = Chunker::new(Arc::clone(&sentences), tokens);
        Self {
            profile,
            sentences,
            chunker,
            classifier,
            extractor,
            assembler: ResultAssembler::new(profile.variant, profile.intro_score_decimals),
        }
    }

    #[must_use]
    pub fn profile(&self) -> &PipelineProfile {
        &self.profile
    }

    /// Produce the analytics payload for `transcript`.
    ///
    /// Blank text is a valid input: no model is called and the payload has
    /// empty segment and key-phrase lists with a neutral intro sentiment.
    ///
    /// # Errors
    ///
    /// Returns the first [`AnalysisError`] raised by any capability; nothing
    /// partial is returned.
    pub async fn analyze(&self, transcript: &Transcript) -> Result<AnalyticsResult, AnalysisError> {
        let started = Instant::now();
        let text = transcript.text.as_str();

        let intro = if transcript.is_blank() {
            SentimentResult::neutral()
        } else {
            self.classifier.classify(truncate_for_classifier(text)).await?
        };

        let segments = self.segment_sentiment(text).await?;
        let key_phrases = self.key_phrases(text).await?;

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(
            call_id = %transcript.call_id,
            variant = %self.profile.variant,
            segments = segments.len(),
            key_phrases = key_phrases.len(),
            elapsed_ms,
            "transcript analysis complete"
        );

        Ok(self
            .assembler
            .assemble(transcript, intro, segments, key_phrases, elapsed_ms))
    }

    async fn segment_sentiment(&self, text: &str) -> Result<Vec<ChunkSentiment>, AnalysisError> {
        match self.profile.segmentation {
            Segmentation::Sentences { max_sentences } => {
                analyze_by_sentence(
                    self.sentences.as_ref(),
                    &self.classifier,
                    text,
                    max_sentences,
                )
                .await
            }
            Segmentation::TokenChunks { token_limit } => {
                analyze_by_chunk(&self.chunker, &self.classifier, text, token_limit).await
            }
        }
    }

    async fn key_phrases(&self, text: &str) -> Result<Vec<EntitySpan>, AnalysisError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let raw = self.extractor.extract(text).await?;
        Ok(match self.profile.entities {
            EntityPolicy::KeyPhrases {
                groups,
                max_phrases,
            } => select_key_phrases(raw, groups, max_phrases),
            EntityPolicy::Filtered => filter_entities(raw),
        })
    }
}
