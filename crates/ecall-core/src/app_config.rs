use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub benzinga_api_key: String,
    pub benzinga_api_url: String,
    pub request_timeout_secs: u64,
    pub inference_url: String,
    pub inference_token: Option<String>,
    pub sentiment_model: String,
    pub ner_model: String,
    pub basic_sentiment_model: String,
    pub basic_ner_model: String,
    pub tokenizer_path: Option<PathBuf>,
    pub chunk_token_limit: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("benzinga_api_key", &"[redacted]")
            .field("benzinga_api_url", &self.benzinga_api_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("inference_url", &self.inference_url)
            .field(
                "inference_token",
                &self.inference_token.as_ref().map(|_| "[redacted]"),
            )
            .field("sentiment_model", &self.sentiment_model)
            .field("ner_model", &self.ner_model)
            .field("basic_sentiment_model", &self.basic_sentiment_model)
            .field("basic_ner_model", &self.basic_ner_model)
            .field("tokenizer_path", &self.tokenizer_path)
            .field("chunk_token_limit", &self.chunk_token_limit)
            .finish()
    }
}
