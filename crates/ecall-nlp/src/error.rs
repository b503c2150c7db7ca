use thiserror::Error;

/// Errors raised by the analysis pipeline.
///
/// Empty or whitespace-only input is not represented here: it yields empty
/// chunk and entity sequences rather than an error.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Invalid setup, e.g. a chunk token limit of zero. Fatal at startup.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An external model capability failed or returned malformed output.
    /// Aborts the whole analysis; no partial result is produced.
    #[error("{capability} call failed: {message}")]
    Upstream {
        capability: &'static str,
        message: String,
    },
}

impl AnalysisError {
    pub(crate) fn upstream(capability: &'static str, message: impl Into<String>) -> Self {
        Self::Upstream {
            capability,
            message: message.into(),
        }
    }
}
