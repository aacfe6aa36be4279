use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use vidquiz_core::{
    ChatCompletionGenerator, PipelineConfig, Provider, QuizPipeline, RetryPolicy,
    SyntaxApiExtractor, YouTubeCaptionSource,
};
use vidquiz_server::{AppState, ServerConfig};

/// CLI wrapper for Provider enum (needed for clap ValueEnum)
#[derive(Clone, Default, ValueEnum)]
enum CliProvider {
    #[default]
    Grok,
    Openai,
    Gemini,
}

impl From<CliProvider> for Provider {
    fn from(cli: CliProvider) -> Self {
        match cli {
            CliProvider::Grok => Provider::Grok,
            CliProvider::Openai => Provider::Openai,
            CliProvider::Gemini => Provider::Gemini,
        }
    }
}

#[derive(Parser)]
#[command(name = "vidquiz-server")]
#[command(about = "Serve quiz generation from YouTube captions over HTTP")]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 7610)]
    port: u16,

    /// AI provider for question generation
    #[arg(short, long, default_value = "grok")]
    provider: CliProvider,

    /// Maximum sentences processed in flight per request
    #[arg(long, default_value_t = 4)]
    concurrency: usize,

    /// Timeout in seconds for each external API call
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Retries per external API call on transient failures
    #[arg(long, default_value_t = 2)]
    retries: u32,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let pipeline_config = PipelineConfig {
        concurrency: cli.concurrency,
        request_timeout: Duration::from_secs(cli.timeout_secs),
        retry: RetryPolicy {
            max_retries: cli.retries,
            ..RetryPolicy::default()
        },
    };

    let http_client = pipeline_config.http_client()?;
    let extractor = SyntaxApiExtractor::from_env(http_client.clone(), pipeline_config.retry)?;
    let generator =
        ChatCompletionGenerator::from_env(http_client, cli.provider.into(), pipeline_config.retry)?;
    let pipeline = QuizPipeline::new(Arc::new(extractor), Arc::new(generator), &pipeline_config);
    let captions = YouTubeCaptionSource::new()?;

    let state = Arc::new(AppState::new(Arc::new(captions), Arc::new(pipeline)));
    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
    };

    vidquiz_server::run(config, state).await
}
