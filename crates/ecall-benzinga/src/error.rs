use thiserror::Error;

/// Errors returned by the Benzinga transcript client.
#[derive(Debug, Error)]
pub enum BenzingaError {
    /// Network or TLS failure, or a non-2xx status other than 404.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL cannot carry a call id path segment.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// The API answered 404 for this call id.
    #[error("no transcript found for call id {0}")]
    NotFound(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The call exists but carries no transcript text.
    #[error("call {0} has no transcript text")]
    EmptyTranscript(String),
}
