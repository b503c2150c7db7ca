//! Shared domain types and process configuration for the earnings-call
//! analytics workspace.

mod app_config;
mod config;
pub mod transcript;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use transcript::{Transcript, TranscriptMetadata};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
