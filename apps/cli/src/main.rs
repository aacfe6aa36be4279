use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use vidquiz_core::{
    CaptionSource, ChatCompletionGenerator, PipelineConfig, Provider, QuizPipeline,
    SyntaxApiExtractor, YouTubeCaptionSource, format_quiz_readable,
};

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
#[command(name = "vidquiz")]
#[command(about = "Fetch YouTube captions and generate a multiple-choice quiz")]
struct Cli {
    /// Video identifier
    video_id: String,

    /// AI provider for question generation
    #[arg(short, long, default_value = "grok")]
    provider: CliProvider,

    /// Maximum sentences processed in flight
    #[arg(short, long, default_value_t = 4)]
    concurrency: usize,

    /// Print the raw JSON question list instead of readable output
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", secs / 60.0, secs % 60.0)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let provider: Provider = cli.provider.into();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Validate API keys early
    if let Err(e) = provider.validate_api_key() {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    let config = PipelineConfig {
        concurrency: cli.concurrency,
        ..PipelineConfig::default()
    };
    let http_client = config.http_client()?;
    let extractor = match SyntaxApiExtractor::from_env(http_client.clone(), config.retry) {
        Ok(extractor) => extractor,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };
    let generator = ChatCompletionGenerator::from_env(http_client, provider.clone(), config.retry)?;

    println!(
        "\n{}  {}\n",
        style("vidquiz").cyan().bold(),
        style("Quiz Generator").dim()
    );
    println!("{}", style("─".repeat(60)).dim());

    let total_start = Instant::now();

    // Step 1: Fetch captions
    let step_start = Instant::now();
    let spinner = create_spinner("Fetching captions...");
    let source = YouTubeCaptionSource::new()?;
    let captions = source.fetch_captions(&cli.video_id).await?;
    let Some(captions) = captions else {
        spinner.finish_and_clear();
        eprintln!(
            "{} No captions found for {}",
            style("Error:").red().bold(),
            style(&cli.video_id).yellow()
        );
        std::process::exit(1);
    };
    spinner.finish_with_message(format!(
        "{} Captions fetched {}",
        style("✓").green().bold(),
        style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
    ));

    // Step 2: Generate quiz
    let step_start = Instant::now();
    let spinner = create_spinner(&format!("Generating quiz with {}...", provider.name()));
    let pipeline = QuizPipeline::new(Arc::new(extractor), Arc::new(generator), &config);
    let quiz = pipeline.build_quiz(&captions).await;
    spinner.finish_with_message(format!(
        "{} Generated {} questions ({}) {}",
        style("✓").green().bold(),
        quiz.len(),
        provider.name(),
        style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
    ));

    println!(
        "\n{} {}\n",
        style("Total time:").dim(),
        style(format_duration(total_start.elapsed())).cyan().bold()
    );
    println!("{}", style("─".repeat(60)).dim());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&quiz)?);
    } else {
        println!("{}", format_quiz_readable(&quiz));
    }

    Ok(())
}
