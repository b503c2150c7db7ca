//! Text-analysis pipeline for earnings-call transcripts.
//!
//! Splits a transcript into token-bounded chunks, classifies sentiment per
//! chunk, extracts and filters named entities over the full text, and
//! assembles a single analytics payload. Model capabilities (sentence
//! splitting, token counting, sentiment, NER) are injected as service objects
//! so the pipeline can run against hosted models or in-process fakes.

pub mod analyzer;
pub mod assemble;
pub mod capabilities;
pub mod chunker;
pub mod error;
pub mod filter;
pub mod hosted;
pub mod pipeline;
pub mod sentence;
pub mod tokens;
pub mod types;

#[cfg(test)]
mod testing;

pub use analyzer::{analyze_by_chunk, analyze_by_sentence, truncate_for_classifier};
pub use assemble::ResultAssembler;
pub use capabilities::{EntityExtractor, SentimentClassifier};
pub use chunker::{Chunk, Chunker};
pub use error::AnalysisError;
pub use filter::{filter_entities, select_key_phrases};
pub use hosted::{
    HostedCapabilities, HostedEntityExtractor, HostedPipeline, HostedSentimentClassifier,
    InferenceEndpoint,
};
pub use pipeline::{AnalysisPipeline, EntityPolicy, PipelineProfile, Segmentation, Variant};
pub use sentence::{SentenceTokenizer, UnicodeSentenceTokenizer};
pub use tokens::{HfTokenCounter, TokenCounter, WhitespaceTokenCounter};
pub use types::{AnalyticsResult, ChunkSentiment, EntitySpan, RawEntity, SentimentResult};

/// Maximum number of characters submitted to a sentiment classifier.
///
/// Longer inputs are silently cut to this length; the classifier's input
/// window is bounded and oversize text is not an error.
pub const CLASSIFIER_MAX_INPUT_CHARS: usize = 512;

/// Default token budget for one chunk under the reference tokenizer.
pub const DEFAULT_CHUNK_TOKEN_LIMIT: usize = 300;
