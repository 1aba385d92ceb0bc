use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use review_analyzer::{
    render_analysis, render_history, Config, LoadOutcome, ReviewApi, ReviewApiClient,
    ReviewSession, SubmitOutcome,
};

#[derive(Parser)]
#[command(name = "review-analyzer")]
#[command(about = "Analyze product reviews and browse analysis history")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(long, default_value = ".review-analyzer/config.yml")]
    config: PathBuf,

    /// Backend API base URL (overrides the config file)
    #[arg(long, env = "REVIEW_API_URL")]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a review for sentiment and key point analysis
    Analyze {
        /// Review text (read from --file or stdin if not provided)
        text: Option<String>,

        /// Read the review text from a file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// Show a page of previously analyzed reviews
    History {
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: i64,
    },

    /// Check that the backend is reachable
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, rendered output to stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("review_analyzer=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
    }
    config.validate()?;

    let client = ReviewApiClient::new(&config);
    info!(base_url = %client.base_url(), "Using review API");

    match cli.command {
        Commands::Analyze { text, file } => {
            let text = read_review_text(text, file)?;
            let min_length = config.submission.min_length;
            analyze(ReviewSession::new(client, &config), &text, min_length).await?;
        }
        Commands::History { page } => {
            history(ReviewSession::new(client, &config), page).await?;
        }
        Commands::Health => {
            health(&client).await?;
        }
    }

    Ok(())
}

fn read_review_text(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    match file {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read review file: {}", path.display())),
        None => {
            use std::io::Read;
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read review from stdin")?;
            Ok(buffer)
        }
    }
}

async fn analyze(
    session: ReviewSession<ReviewApiClient>,
    text: &str,
    min_length: usize,
) -> Result<()> {
    match session.submit(text).await {
        SubmitOutcome::Rejected => {
            anyhow::bail!(
                "Review is too short. Enter at least {} characters.",
                min_length
            );
        }
        SubmitOutcome::Failed => {
            let store = session.store();
            anyhow::bail!("{}", store.error().unwrap_or("Analysis failed"));
        }
        SubmitOutcome::Applied | SubmitOutcome::Stale => {}
    }

    let store = session.store();
    if let Some(analysis) = store.current_analysis() {
        println!("{}", render_analysis(analysis));
    }

    Ok(())
}

async fn history(session: ReviewSession<ReviewApiClient>, page: i64) -> Result<()> {
    let mut outcome = session.load_initial().await;

    if outcome == LoadOutcome::Applied && page != 1 {
        outcome = session.load_page(page).await;
        if outcome == LoadOutcome::Skipped {
            let total_pages = session.store().pagination().total_pages;
            anyhow::bail!("Page {} is out of range (1-{})", page, total_pages.max(1));
        }
    }

    if outcome == LoadOutcome::Failed {
        let store = session.store();
        anyhow::bail!("{}", store.error().unwrap_or("Failed to load history"));
    }

    println!("{}", render_history(&session.store()));

    Ok(())
}

async fn health(client: &ReviewApiClient) -> Result<()> {
    let status = client.health().await.context("Health check failed")?;

    match &status.service {
        Some(service) => println!("{}: {}", service, status.status),
        None => println!("{}", status.status),
    }

    if !status.is_healthy() {
        anyhow::bail!("Backend reported status '{}'", status.status);
    }

    Ok(())
}
