//! Model capabilities the pipeline depends on.
//!
//! Implementations are built once at process start and shared read-only
//! across requests, so they must be `Send + Sync` and keep no per-call state.

use std::future::Future;

use crate::error::AnalysisError;
use crate::types::{RawEntity, SentimentResult};

/// Classifies bounded-length text into one label with a confidence score.
pub trait SentimentClassifier: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AnalysisError::Upstream`] if the model call fails or its
    /// output is malformed.
    fn classify(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<SentimentResult, AnalysisError>> + Send;
}

/// Extracts grouped named entities from unbounded text.
pub trait EntityExtractor: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AnalysisError::Upstream`] if the model call fails or its
    /// output is malformed.
    fn extract(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Vec<RawEntity>, AnalysisError>> + Send;
}
