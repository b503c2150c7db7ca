//! Hosted model adapters (Hugging Face Inference API shape).
//!
//! Each model is served at `{inference_url}/{model}` and accepts
//! `{"inputs": ...}`. Text classification answers with `[{label, score}]`
//! (sometimes nested one level); token classification with grouped entities
//! answers with `[{entity_group, word, score, start, end}]`.

use std::sync::Arc;
use std::time::Duration;

use ecall_core::AppConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::capabilities::{EntityExtractor, SentimentClassifier};
use crate::error::AnalysisError;
use crate::pipeline::{AnalysisPipeline, PipelineProfile};
use crate::sentence::{SentenceTokenizer, UnicodeSentenceTokenizer};
use crate::tokens::{HfTokenCounter, TokenCounter, WhitespaceTokenCounter};
use crate::types::{RawEntity, SentimentResult};

/// Pipeline backed by hosted sentiment and NER models.
pub type HostedPipeline = AnalysisPipeline<HostedSentimentClassifier, HostedEntityExtractor>;

#[derive(Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
    options: RequestOptions,
}

#[derive(Serialize)]
struct NerParameters {
    aggregation_strategy: &'static str,
}

#[derive(Serialize)]
struct NerRequest<'a> {
    inputs: &'a str,
    parameters: NerParameters,
    options: RequestOptions,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Nested(Vec<Vec<SentimentResult>>),
    Flat(Vec<SentimentResult>),
}

impl ClassificationResponse {
    fn into_scores(self) -> Vec<SentimentResult> {
        match self {
            Self::Nested(outer) => outer.into_iter().next().unwrap_or_default(),
            Self::Flat(scores) => scores,
        }
    }
}

/// HTTP connection to a model-serving endpoint, shared by all adapters.
#[derive(Clone)]
pub struct InferenceEndpoint {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl InferenceEndpoint {
    /// # Errors
    ///
    /// Returns [`AnalysisError::Configuration`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        token: Option<&str>,
        timeout_secs: u64,
    ) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("ecall/0.1 (transcript-analytics)")
            .build()
            .map_err(|e| {
                AnalysisError::Configuration(format!("failed to build inference client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(ToOwned::to_owned),
        })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/{}", self.base_url, model.trim_start_matches('/'))
    }

    async fn post_json<B, T>(
        &self,
        capability: &'static str,
        model: &str,
        body: &B,
    ) -> Result<T, AnalysisError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let mut request = self.client.post(self.model_url(model)).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AnalysisError::upstream(capability, format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AnalysisError::upstream(
                capability,
                format!("model {model} returned status {status}: {detail}"),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AnalysisError::upstream(capability, format!("response parse error: {e}")))
    }
}

/// Sentiment via a hosted text-classification model.
pub struct HostedSentimentClassifier {
    endpoint: InferenceEndpoint,
    model: String,
}

impl HostedSentimentClassifier {
    #[must_use]
    pub fn new(endpoint: InferenceEndpoint, model: impl Into<String>) -> Self {
        Self {
            endpoint,
            model: model.into(),
        }
    }
}

impl SentimentClassifier for HostedSentimentClassifier {
    async fn classify(&self, text: &str) -> Result<SentimentResult, AnalysisError> {
        let request = ClassifyRequest {
            inputs: text,
            options: RequestOptions {
                wait_for_model: true,
            },
        };
        let response: ClassificationResponse = self
            .endpoint
            .post_json("sentiment", &self.model, &request)
            .await?;

        let top = response
            .into_scores()
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or_else(|| AnalysisError::upstream("sentiment", "model returned no labels"))?;

        if !(0.0..=1.0).contains(&top.score) {
            return Err(AnalysisError::upstream(
                "sentiment",
                format!("score {} outside [0, 1]", top.score),
            ));
        }
        Ok(top)
    }
}

/// Named entities via a hosted token-classification model.
pub struct HostedEntityExtractor {
    endpoint: InferenceEndpoint,
    model: String,
}

impl HostedEntityExtractor {
    #[must_use]
    pub fn new(endpoint: InferenceEndpoint, model: impl Into<String>) -> Self {
        Self {
            endpoint,
            model: model.into(),
        }
    }
}

impl EntityExtractor for HostedEntityExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<RawEntity>, AnalysisError> {
        let request = NerRequest {
            inputs: text,
            parameters: NerParameters {
                aggregation_strategy: "simple",
            },
            options: RequestOptions {
                wait_for_model: true,
            },
        };
        self.endpoint.post_json("ner", &self.model, &request).await
    }
}

/// Capability handles loaded once at process start.
///
/// The reference tokenizer is read from disk here and nowhere else; both
/// pipeline variants share the same handles.
#[derive(Clone)]
pub struct HostedCapabilities {
    sentences: Arc<dyn SentenceTokenizer>,
    tokens: Arc<dyn TokenCounter>,
    endpoint: InferenceEndpoint,
}

impl HostedCapabilities {
    #[must_use]
    pub fn new(
        sentences: Arc<dyn SentenceTokenizer>,
        tokens: Arc<dyn TokenCounter>,
        endpoint: InferenceEndpoint,
    ) -> Self {
        Self {
            sentences,
            tokens,
            endpoint,
        }
    }

    /// # Errors
    ///
    /// Returns [`AnalysisError::Configuration`] if the tokenizer file cannot
    /// be loaded or the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AnalysisError> {
        let tokens: Arc<dyn TokenCounter> = if let Some(path) = &config.tokenizer_path {
            tracing::info!(path = %path.display(), "loading reference tokenizer");
            Arc::new(HfTokenCounter::from_file(path)?)
        } else {
            tracing::warn!("ECALL_TOKENIZER_PATH not set; sizing chunks by whitespace words");
            Arc::new(WhitespaceTokenCounter)
        };

        let endpoint = InferenceEndpoint::new(
            &config.inference_url,
            config.inference_token.as_deref(),
            config.request_timeout_secs,
        )?;

        Ok(Self::new(Arc::new(UnicodeSentenceTokenizer), tokens, endpoint))
    }

    #[must_use]
    pub fn pipeline(
        &self,
        profile: PipelineProfile,
        sentiment_model: &str,
        ner_model: &str,
    ) -> HostedPipeline {
        AnalysisPipeline::new(
            profile,
            Arc::clone(&self.sentences),
            Arc::clone(&self.tokens),
            HostedSentimentClassifier::new(self.endpoint.clone(), sentiment_model),
            HostedEntityExtractor::new(self.endpoint.clone(), ner_model),
        )
    }

    #[must_use]
    pub fn basic_pipeline(&self, config: &AppConfig) -> HostedPipeline {
        self.pipeline(
            PipelineProfile::basic(),
            &config.basic_sentiment_model,
            &config.basic_ner_model,
        )
    }

    /// # Errors
    ///
    /// Returns [`AnalysisError::Configuration`] if the chunk token limit is zero.
    pub fn advanced_pipeline(&self, config: &AppConfig) -> Result<HostedPipeline, AnalysisError> {
        Ok(self.pipeline(
            PipelineProfile::advanced(config.chunk_token_limit)?,
            &config.sentiment_model,
            &config.ner_model,
        ))
    }
}
