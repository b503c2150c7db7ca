//! HTTP client for the Benzinga transcript API.
//!
//! One GET per call id; the API key travels as the `token` query parameter.
//! There is no retry: a failed fetch surfaces immediately to the caller.

use std::time::Duration;

use ecall_core::Transcript;
use reqwest::{Client, StatusCode, Url};

use crate::error::BenzingaError;
use crate::types::CallResponse;

pub const DEFAULT_BASE_URL: &str = "https://api.benzinga.com/api/v1/transcripts/calls";

/// Client for the Benzinga `transcripts/calls` endpoint.
pub struct BenzingaClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl BenzingaClient {
    /// # Errors
    ///
    /// Returns [`BenzingaError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`BenzingaError::InvalidBaseUrl`] if
    /// `base_url` does not parse or cannot take path segments.
    pub fn new(api_key: &str, base_url: &str, timeout_secs: u64) -> Result<Self, BenzingaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("ecall/0.1 (transcript-analytics)")
            .build()?;

        let parsed = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| BenzingaError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(BenzingaError::InvalidBaseUrl(base_url.to_owned()));
        }

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: parsed,
        })
    }

    /// Fetches the transcript for `call_id`.
    ///
    /// # Errors
    ///
    /// - [`BenzingaError::NotFound`] when the API answers 404.
    /// - [`BenzingaError::Http`] on network failure or any other non-2xx status.
    /// - [`BenzingaError::Deserialize`] if the body is not the expected JSON.
    /// - [`BenzingaError::EmptyTranscript`] when the call carries no text.
    pub async fn get_transcript(&self, call_id: &str) -> Result<Transcript, BenzingaError> {
        let url = self.transcript_url(call_id);
        tracing::debug!(call_id, "fetching transcript");

        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(BenzingaError::NotFound(call_id.to_owned()));
        }
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let parsed: CallResponse =
            serde_json::from_str(&body).map_err(|e| BenzingaError::Deserialize {
                context: format!("transcript(call_id={call_id})"),
                source: e,
            })?;

        parsed
            .into_transcript(call_id)
            .ok_or_else(|| BenzingaError::EmptyTranscript(call_id.to_owned()))
    }

    /// Builds `{base_url}/{call_id}?token={api_key}` with the call id encoded
    /// as a single path segment.
    fn transcript_url(&self, call_id: &str) -> Url {
        let mut url = self.base_url.clone();
        // Always Ok: cannot-be-a-base URLs are rejected in `new`.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(call_id);
        }
        url.query_pairs_mut().append_pair("token", &self.api_key);
        url
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
