//! CLI for one-off external job ingestion
//!
//! Runs the same ingestor the hourly scheduler uses. Output is JSON so it can
//! be piped into other tooling.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jobboard_core::config::JSearchConfig;
use jobboard_core::domains::jobs::{ingest_external_jobs, normalize_external_job};
use jobboard_core::kernel::{BaseJobSource, JSearchClient, PgJobStore};
use serde::Serialize;
use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ingest_cli")]
#[command(about = "External job ingestion CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch external jobs and store the new ones
    Run,

    /// Fetch and normalize external jobs without touching the database
    Fetch {
        /// Print at most this many jobs
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NormalizedJob {
    title: String,
    location: String,
    salary: f64,
    job_type: Vec<String>,
    tags: Vec<String>,
    source: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,jobboard_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => cmd_run().await,
        Commands::Fetch { limit } => cmd_fetch(limit).await,
    }
}

fn job_source() -> Result<JSearchClient> {
    let config = JSearchConfig::from_env()?;
    JSearchClient::new(config)
}

async fn get_pool() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

async fn cmd_run() -> Result<()> {
    let source = job_source()?;
    let pool = get_pool().await?;
    let store = PgJobStore::new(pool);

    let report = ingest_external_jobs(&source, &store).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn cmd_fetch(limit: Option<usize>) -> Result<()> {
    let source: Arc<dyn BaseJobSource> = Arc::new(job_source()?);
    let raw_jobs = source.fetch_jobs().await?;

    let jobs: Vec<NormalizedJob> = raw_jobs
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|raw| {
            let job = normalize_external_job(raw, source.source_name());
            NormalizedJob {
                source: job.source().map(str::to_string),
                title: job.title,
                location: job.location,
                salary: job.salary,
                job_type: job.job_type,
                tags: job.tags,
            }
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&jobs)?);
    Ok(())
}
