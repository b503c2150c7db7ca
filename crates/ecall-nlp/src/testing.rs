//! In-process capability fakes for unit tests.

use std::sync::Mutex;

use crate::capabilities::{EntityExtractor, SentimentClassifier};
use crate::error::AnalysisError;
use crate::types::{RawEntity, SentimentResult};

/// Returns a fixed sentiment and records every input it was given.
pub(crate) struct FakeClassifier {
    pub result: SentimentResult,
    pub fail: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeClassifier {
    pub(crate) fn new(label: &str, score: f64) -> Self {
        Self {
            result: SentimentResult::new(label, score),
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new("neutral", 0.0)
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl SentimentClassifier for FakeClassifier {
    async fn classify(&self, text: &str) -> Result<SentimentResult, AnalysisError> {
        self.calls.lock().unwrap().push(text.to_string());
        if self.fail {
            return Err(AnalysisError::upstream("sentiment", "model unavailable"));
        }
        Ok(self.result.clone())
    }
}

/// Returns a fixed entity list.
pub(crate) struct FakeExtractor {
    pub entities: Vec<RawEntity>,
    pub fail: bool,
    pub calls: Mutex<usize>,
}

impl FakeExtractor {
    pub(crate) fn new(entities: Vec<RawEntity>) -> Self {
        Self {
            entities,
            fail: false,
            calls: Mutex::new(0),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    pub(crate) fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl EntityExtractor for FakeExtractor {
    async fn extract(&self, _text: &str) -> Result<Vec<RawEntity>, AnalysisError> {
        *self.calls.lock().unwrap() += 1;
        if self.fail {
            return Err(AnalysisError::upstream("ner", "model unavailable"));
        }
        Ok(self.entities.clone())
    }
}
