//! Client for the Benzinga earnings-call transcript API.

pub mod client;
pub mod error;
pub mod types;

pub use client::BenzingaClient;
pub use error::BenzingaError;
pub use types::{CallResponse, TranscriptEntry};
