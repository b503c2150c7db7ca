//! `/analytics` and `/analytics_advanced` handlers.
//!
//! Both routes fetch the transcript by call id, run one pipeline profile, and
//! return the flat analytics payload. They differ only in the pipeline and in
//! how provider failures are reported.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use ecall_benzinga::BenzingaError;
use ecall_nlp::{AnalyticsResult, HostedPipeline, Variant};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

const MISSING_CALL_ID: &str = "call_id parameter is required";
const MISSING_TEXT: &str = "Could not find transcript text in the API response.";
const BASIC_NOT_FOUND: &str = "Invalid call_id provided.";
const BASIC_FETCH_FAILED: &str = "Failed to fetch transcript from Benzinga API.";
const ADVANCED_FETCH_FAILED: &str = "Failed to fetch or invalid transcript data";

#[derive(Debug, Deserialize)]
pub(super) struct AnalyticsQuery {
    pub call_id: Option<String>,
}

pub(super) async fn basic_analytics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResult>, ApiError> {
    run_analytics(&state, &state.basic, req_id, query).await
}

pub(super) async fn advanced_analytics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResult>, ApiError> {
    run_analytics(&state, &state.advanced, req_id, query).await
}

async fn run_analytics(
    state: &AppState,
    pipeline: &HostedPipeline,
    req_id: RequestId,
    query: AnalyticsQuery,
) -> Result<Json<AnalyticsResult>, ApiError> {
    let variant = pipeline.profile().variant;
    let Some(call_id) = query
        .call_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
    else {
        return Err(ApiError::new(req_id.0, "bad_request", MISSING_CALL_ID));
    };

    let transcript = state
        .transcripts
        .get_transcript(call_id)
        .await
        .map_err(|e| map_fetch_error(req_id.0.clone(), variant, &e))?;

    let result = pipeline.analyze(&transcript).await.map_err(|e| {
        tracing::error!(call_id, %variant, error = %e, "transcript analysis failed");
        ApiError::new(req_id.0.clone(), "bad_gateway", "transcript analysis failed")
    })?;

    Ok(Json(result))
}

fn map_fetch_error(request_id: String, variant: Variant, error: &BenzingaError) -> ApiError {
    match error {
        BenzingaError::EmptyTranscript(_) => ApiError::new(request_id, "not_found", MISSING_TEXT),
        BenzingaError::NotFound(_) => {
            let message = match variant {
                Variant::Basic => BASIC_NOT_FOUND,
                Variant::Advanced => ADVANCED_FETCH_FAILED,
            };
            ApiError::new(request_id, "not_found", message)
        }
        other => {
            tracing::error!(error = %other, %variant, "transcript fetch failed");
            match variant {
                Variant::Basic => ApiError::new(request_id, "bad_gateway", BASIC_FETCH_FAILED),
                Variant::Advanced => ApiError::new(request_id, "not_found", ADVANCED_FETCH_FAILED),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_transcript_message_is_shared() {
        for variant in [Variant::Basic, Variant::Advanced] {
            let err = map_fetch_error(
                "r".to_string(),
                variant,
                &BenzingaError::EmptyTranscript("c".to_string()),
            );
            assert_eq!(err.error.code, "not_found");
            assert_eq!(err.error.message, MISSING_TEXT);
        }
    }

    #[test]
    fn deserialize_failure_follows_variant_fetch_policy() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = BenzingaError::Deserialize {
            context: "transcript(call_id=c)".to_string(),
            source,
        };

        let basic = map_fetch_error("r".to_string(), Variant::Basic, &error);
        assert_eq!(basic.error.code, "bad_gateway");
        assert_eq!(basic.error.message, BASIC_FETCH_FAILED);

        let advanced = map_fetch_error("r".to_string(), Variant::Advanced, &error);
        assert_eq!(advanced.error.code, "not_found");
        assert_eq!(advanced.error.message, ADVANCED_FETCH_FAILED);
    }
}
