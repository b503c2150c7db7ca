mod analytics;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use ecall_benzinga::BenzingaClient;
use ecall_core::AppConfig;
use ecall_nlp::{HostedCapabilities, HostedPipeline};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

/// Long-lived handles shared by every request.
///
/// Both pipelines share the same capability handles; building them is the
/// only place model configuration is read.
#[derive(Clone)]
pub struct AppState {
    pub transcripts: Arc<BenzingaClient>,
    pub basic: Arc<HostedPipeline>,
    pub advanced: Arc<HostedPipeline>,
}

impl AppState {
    pub fn new(transcripts: BenzingaClient, basic: HostedPipeline, advanced: HostedPipeline) -> Self {
        Self {
            transcripts: Arc::new(transcripts),
            basic: Arc::new(basic),
            advanced: Arc::new(advanced),
        }
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let transcripts = BenzingaClient::new(
            &config.benzinga_api_key,
            &config.benzinga_api_url,
            config.request_timeout_secs,
        )?;
        let capabilities = HostedCapabilities::from_config(config)?;
        Ok(Self::new(
            transcripts,
            capabilities.basic_pipeline(config),
            capabilities.advanced_pipeline(config)?,
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    fn status(&self) -> StatusCode {
        match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            "bad_gateway" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analytics", get(analytics::basic_analytics))
        .route("/analytics_advanced", get(analytics::advanced_analytics))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use ecall_nlp::{InferenceEndpoint, UnicodeSentenceTokenizer, WhitespaceTokenCounter};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Harness {
        benzinga: MockServer,
        models: MockServer,
        app: Router,
    }

    async fn harness() -> Harness {
        let benzinga = MockServer::start().await;
        let models = MockServer::start().await;

        let transcripts =
            BenzingaClient::new("test-key", &benzinga.uri(), 5).expect("benzinga client");
        let endpoint = InferenceEndpoint::new(&models.uri(), None, 5).expect("endpoint");
        let capabilities = HostedCapabilities::new(
            Arc::new(UnicodeSentenceTokenizer),
            Arc::new(WhitespaceTokenCounter),
            endpoint,
        );
        let basic = capabilities.pipeline(ecall_nlp::PipelineProfile::basic(), "sst2", "bert-ner");
        let advanced = capabilities.pipeline(
            ecall_nlp::PipelineProfile::advanced(300).expect("profile"),
            "finbert",
            "roberta-ner",
        );

        Harness {
            benzinga,
            models,
            app: build_app(AppState::new(transcripts, basic, advanced)),
        }
    }

    async fn mount_models(models: &MockServer) {
        for model in ["/sst2", "/finbert"] {
            Mock::given(method("POST"))
                .and(path(model))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([[
                    {"label": "positive", "score": 0.876_543}
                ]])))
                .mount(models)
                .await;
        }
        for model in ["/bert-ner", "/roberta-ner"] {
            Mock::given(method("POST"))
                .and(path(model))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                    {"entity_group": "ORG", "word": "Microsoft"},
                    {"entity_group": "LOC", "word": "Redmond"},
                    {"entity_group": "MISC", "word": "-"}
                ])))
                .mount(models)
                .await;
        }
    }

    async fn mount_call(benzinga: &MockServer, status: u16, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/6543"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(benzinga)
            .await;
    }

    fn call_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "symbol": "MSFT",
            "start_time": "2024-04-25T17:30:00-04:00",
            "transcripts": [{"text": text}]
        })
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (status, serde_json::from_slice(&body).expect("json parse"))
    }

    #[test]
    fn api_error_codes_map_to_statuses() {
        let cases = [
            ("bad_request", StatusCode::BAD_REQUEST),
            ("not_found", StatusCode::NOT_FOUND),
            ("bad_gateway", StatusCode::BAD_GATEWAY),
            ("internal_error", StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (code, status) in cases {
            let response = ApiError::new("req-1", code, "x").into_response();
            assert_eq!(response.status(), status, "code {code}");
        }
    }

    #[tokio::test]
    async fn health_echoes_request_id() {
        let h = harness().await;
        let response = h
            .app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(REQUEST_ID_HEADER, "req-abc")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER).map(|v| v.to_str().ok()),
            Some(Some("req-abc"))
        );
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["meta"]["request_id"], "req-abc");
    }

    #[tokio::test]
    async fn missing_call_id_is_bad_request_on_both_routes() {
        for uri in ["/analytics", "/analytics_advanced?call_id=", "/analytics?call_id=%20"] {
            let h = harness().await;
            let (status, json) = get(h.app, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(json["error"]["code"], "bad_request");
            assert_eq!(json["error"]["message"], "call_id parameter is required");
            assert!(json["meta"]["request_id"].is_string());
        }
    }

    #[tokio::test]
    async fn unknown_call_id_messages_differ_by_route() {
        let h = harness().await;
        mount_call(&h.benzinga, 404, serde_json::json!({})).await;

        let (status, json) = get(h.app.clone(), "/analytics?call_id=6543").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["message"], "Invalid call_id provided.");

        let (status, json) = get(h.app, "/analytics_advanced?call_id=6543").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            json["error"]["message"],
            "Failed to fetch or invalid transcript data"
        );
    }

    #[tokio::test]
    async fn provider_failure_is_bad_gateway_on_basic_route_only() {
        let h = harness().await;
        mount_call(&h.benzinga, 500, serde_json::json!({})).await;

        let (status, json) = get(h.app.clone(), "/analytics?call_id=6543").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            json["error"]["message"],
            "Failed to fetch transcript from Benzinga API."
        );

        let (status, _) = get(h.app, "/analytics_advanced?call_id=6543").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn transcript_without_text_is_not_found() {
        let h = harness().await;
        mount_call(&h.benzinga, 200, serde_json::json!({"transcripts": []})).await;

        for uri in ["/analytics?call_id=6543", "/analytics_advanced?call_id=6543"] {
            let (status, json) = get(h.app.clone(), uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(
                json["error"]["message"],
                "Could not find transcript text in the API response."
            );
        }
    }

    #[tokio::test]
    async fn advanced_route_returns_filtered_payload() {
        let h = harness().await;
        mount_call(
            &h.benzinga,
            200,
            call_body("Microsoft reported strong results. Cloud revenue grew."),
        )
        .await;
        mount_models(&h.models).await;

        let (status, json) = get(h.app, "/analytics_advanced?call_id=6543").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["call_id"], "6543");
        assert_eq!(json["company"], "MSFT");
        assert_eq!(json["date"], "2024-04-25");

        let analytics = &json["advanced_analytics"];
        assert_eq!(analytics["overall_sentiment_on_intro"]["score"], 0.8765);
        assert_eq!(analytics["overall_sentiment_on_intro"]["label"], "positive");
        assert_eq!(analytics["word_count"], 7);
        assert_eq!(analytics["sentiment_by_chunk"][0]["chunk_number"], 1);
        assert_eq!(
            analytics["filtered_key_phrases"],
            serde_json::json!([
                {"text": "Microsoft", "type": "ORG"},
                {"text": "Redmond", "type": "LOC"}
            ])
        );
    }

    #[tokio::test]
    async fn basic_route_returns_key_phrases() {
        let h = harness().await;
        mount_call(
            &h.benzinga,
            200,
            call_body("Microsoft reported strong results. Cloud revenue grew."),
        )
        .await;
        mount_models(&h.models).await;

        let (status, json) = get(h.app, "/analytics?call_id=6543").await;
        assert_eq!(status, StatusCode::OK);

        let analytics = &json["analytics"];
        assert_eq!(analytics["overall_sentiment"]["score"], 0.88);
        assert_eq!(
            analytics["sentiment_by_utterance"]
                .as_array()
                .map(Vec::len),
            Some(2)
        );
        assert_eq!(
            analytics["key_phrases"],
            serde_json::json!(["Microsoft", "-"])
        );
    }

    #[tokio::test]
    async fn model_failure_is_bad_gateway() {
        let h = harness().await;
        mount_call(&h.benzinga, 200, call_body("Revenue grew.")).await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&h.models)
            .await;

        let (status, json) = get(h.app, "/analytics_advanced?call_id=6543").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"]["code"], "bad_gateway");
    }
}
