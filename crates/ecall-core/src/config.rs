use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("ECALL_ENV", "development"))?;
    let bind_addr = parse("ECALL_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("ECALL_LOG_LEVEL", "info");

    let benzinga_api_key = require("BENZINGA_API_KEY")?;
    let benzinga_api_url = or_default(
        "BENZINGA_API_URL",
        "https://api.benzinga.com/api/v1/transcripts/calls",
    );
    let request_timeout_secs = parse_u64("ECALL_REQUEST_TIMEOUT_SECS", "30")?;

    let inference_url = or_default(
        "ECALL_INFERENCE_URL",
        "https://api-inference.huggingface.co/models",
    );
    let inference_token = optional("ECALL_INFERENCE_TOKEN");
    let sentiment_model = or_default("ECALL_SENTIMENT_MODEL", "ProsusAI/finbert");
    let ner_model = or_default(
        "ECALL_NER_MODEL",
        "Jean-Baptiste/roberta-large-ner-english",
    );
    let basic_sentiment_model = or_default(
        "ECALL_BASIC_SENTIMENT_MODEL",
        "distilbert-base-uncased-finetuned-sst-2-english",
    );
    let basic_ner_model = or_default("ECALL_BASIC_NER_MODEL", "dslim/bert-base-NER");

    let tokenizer_path = optional("ECALL_TOKENIZER_PATH").map(PathBuf::from);
    let chunk_token_limit = parse_usize("ECALL_CHUNK_TOKEN_LIMIT", "300")?;
    if chunk_token_limit == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ECALL_CHUNK_TOKEN_LIMIT".to_string(),
            reason: "chunk token limit must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        benzinga_api_key,
        benzinga_api_url,
        request_timeout_secs,
        inference_url,
        inference_token,
        sentiment_model,
        ner_model,
        basic_sentiment_model,
        basic_ner_model,
        tokenizer_path,
        chunk_token_limit,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ECALL_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
