use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ecall_benzinga::BenzingaClient;
use ecall_core::{AppConfig, Transcript, TranscriptMetadata};
use ecall_nlp::{
    AnalysisError, Chunker, HfTokenCounter, HostedCapabilities, TokenCounter,
    UnicodeSentenceTokenizer, WhitespaceTokenCounter, DEFAULT_CHUNK_TOKEN_LIMIT,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ecall-cli")]
#[command(about = "Earnings-call transcript analytics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a transcript from Benzinga and print its analytics.
    Analyze {
        #[arg(long)]
        call_id: String,
        /// Use the per-sentence basic profile instead of token chunks.
        #[arg(long)]
        basic: bool,
    },
    /// Analyze a transcript stored in a local text file.
    AnalyzeFile {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        /// Call start timestamp, e.g. `2024-04-25T17:30:00Z`.
        #[arg(long)]
        start_time: Option<String>,
        #[arg(long)]
        basic: bool,
    },
    /// Print the token-chunk plan for a local transcript. Calls no model.
    Chunks {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value_t = DEFAULT_CHUNK_TOKEN_LIMIT)]
        limit: usize,
        #[arg(long, env = "ECALL_TOKENIZER_PATH")]
        tokenizer: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze { call_id, basic } => {
            let config = ecall_core::load_app_config()?;
            let client = BenzingaClient::new(
                &config.benzinga_api_key,
                &config.benzinga_api_url,
                config.request_timeout_secs,
            )?;
            let transcript = client
                .get_transcript(&call_id)
                .await
                .with_context(|| format!("failed to fetch transcript for call {call_id}"))?;
            analyze(&config, &transcript, basic).await
        }
        Commands::AnalyzeFile {
            path,
            symbol,
            start_time,
            basic,
        } => {
            let config = ecall_core::load_app_config()?;
            let transcript = read_transcript(&path, TranscriptMetadata { symbol, start_time })?;
            analyze(&config, &transcript, basic).await
        }
        Commands::Chunks {
            path,
            limit,
            tokenizer,
        } => print_chunks(&path, limit, tokenizer.as_deref()),
    }
}

async fn analyze(config: &AppConfig, transcript: &Transcript, basic: bool) -> anyhow::Result<()> {
    let capabilities = HostedCapabilities::from_config(config)?;
    let pipeline = if basic {
        capabilities.basic_pipeline(config)
    } else {
        capabilities.advanced_pipeline(config)?
    };

    tracing::info!(
        call_id = %transcript.call_id,
        variant = %pipeline.profile().variant,
        "analyzing transcript"
    );
    let result = pipeline.analyze(transcript).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Reads a local transcript; the file stem stands in for the call id.
fn read_transcript(path: &Path, metadata: TranscriptMetadata) -> anyhow::Result<Transcript> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read transcript {}", path.display()))?;
    let call_id = path
        .file_stem()
        .map_or_else(|| "local".to_string(), |s| s.to_string_lossy().into_owned());
    Ok(Transcript::new(call_id, text, metadata))
}

fn print_chunks(path: &Path, limit: usize, tokenizer: Option<&Path>) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read transcript {}", path.display()))?;
    let tokens: Arc<dyn TokenCounter> = match tokenizer {
        Some(tokenizer) => Arc::new(HfTokenCounter::from_file(tokenizer)?),
        None => Arc::new(WhitespaceTokenCounter),
    };
    let chunker = Chunker::new(Arc::new(UnicodeSentenceTokenizer), tokens);
    println!(
        "{}",
        serde_json::to_string_pretty(&chunk_plan(&chunker, &text, limit)?)?
    );
    Ok(())
}

fn chunk_plan(
    chunker: &Chunker,
    text: &str,
    limit: usize,
) -> Result<serde_json::Value, AnalysisError> {
    let chunks = chunker.chunk(text, limit)?;
    Ok(chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            serde_json::json!({
                "chunk_number": i + 1,
                "token_count": chunk.token_count(),
                "sentence_count": chunk.sentences().len(),
            })
        })
        .collect())
}
