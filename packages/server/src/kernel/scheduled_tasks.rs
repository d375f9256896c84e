//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! - External job ingestion, hourly at minute 0 by default
//!
//! # Architecture
//!
//! ```text
//! Scheduler (every hour)
//!     │
//!     └─► ingest_external_jobs()
//!             ├─► job source: fetch first page
//!             └─► job store: check-then-insert per listing
//! ```
//!
//! The manual HTTP trigger calls the same ingestor. There is no lock between
//! the two paths.

use anyhow::Result;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::config::IngestConfig;
use crate::domains::jobs::ingest_external_jobs;
use crate::kernel::ServerDeps;

/// Start all scheduled tasks
pub async fn start_scheduler(deps: ServerDeps, config: &IngestConfig) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let ingest_job = Job::new_async(config.schedule.as_str(), move |_uuid, _lock| {
        let deps = deps.clone();
        Box::pin(async move {
            run_scheduled_ingest(&deps).await;
        })
    })?;

    scheduler.add(ingest_job).await?;
    scheduler.start().await?;

    tracing::info!(
        schedule = %config.schedule,
        "Scheduled tasks started (external job ingestion)"
    );
    Ok(scheduler)
}

/// Run one scheduled ingestion. Failures are logged; the next tick retries.
pub async fn run_scheduled_ingest(deps: &ServerDeps) {
    tracing::info!("Running scheduled external job ingestion");

    match ingest_external_jobs(deps.job_source.as_ref(), deps.jobs.as_ref()).await {
        Ok(report) => tracing::info!(
            fetched = report.fetched,
            inserted = report.inserted,
            duplicates = report.duplicates,
            "Scheduled ingestion complete"
        ),
        Err(e) => tracing::error!(
            error = %e,
            inserted = e.inserted(),
            "Scheduled ingestion failed"
        ),
    }
}
