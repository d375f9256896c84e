//! Deduplicating ingestion of external listings.
//!
//! One run fetches a page from the source, normalizes every record and does a
//! check-then-insert against (title, location, source). The check and the
//! insert are separate storage calls with no transaction, so two concurrent
//! runs can both insert the same listing.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::normalize::normalize_external_job;
use crate::domains::jobs::models::NewJob;
use crate::kernel::{BaseJobSource, BaseJobStore};

#[derive(Error, Debug)]
pub enum IngestError {
    /// Network failure, non-2xx, or a payload that does not parse
    #[error("external job source unavailable: {0:#}")]
    SourceUnavailable(anyhow::Error),

    /// A read or write against the job store failed; the rest of the batch
    /// was abandoned after `inserted` new jobs
    #[error("job storage failed after {inserted} new jobs: {source:#}")]
    Storage {
        inserted: usize,
        #[source]
        source: anyhow::Error,
    },
}

impl IngestError {
    /// New jobs that were committed before the run failed
    pub fn inserted(&self) -> usize {
        match self {
            IngestError::SourceUnavailable(_) => 0,
            IngestError::Storage { inserted, .. } => *inserted,
        }
    }
}

/// Outcome of one successful run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub fetched: usize,
    pub inserted: usize,
    pub duplicates: usize,
    /// Listings without a title or description
    pub skipped: usize,
}

/// Fetch, normalize and store one page of external jobs.
pub async fn ingest_external_jobs(
    source: &dyn BaseJobSource,
    store: &dyn BaseJobStore,
) -> Result<IngestReport, IngestError> {
    info!(source = source.source_name(), "Fetching external jobs");

    let raw_jobs = source.fetch_jobs().await.map_err(|e| {
        error!(error = %e, "External job fetch failed");
        IngestError::SourceUnavailable(e)
    })?;

    info!("External jobs fetched: {}", raw_jobs.len());

    let normalized: Vec<NewJob> = raw_jobs
        .iter()
        .map(|raw| normalize_external_job(raw, source.source_name()))
        .collect();

    let mut report = store_new_jobs(normalized, store).await?;
    report.fetched = raw_jobs.len();

    info!(
        inserted = report.inserted,
        duplicates = report.duplicates,
        skipped = report.skipped,
        "Saved {} new jobs",
        report.inserted
    );
    Ok(report)
}

/// Check-then-insert each normalized job. Stops at the first storage error.
pub async fn store_new_jobs(
    jobs: Vec<NewJob>,
    store: &dyn BaseJobStore,
) -> Result<IngestReport, IngestError> {
    let mut report = IngestReport {
        fetched: jobs.len(),
        ..IngestReport::default()
    };

    for job in jobs {
        if job.title.trim().is_empty() || job.description.trim().is_empty() {
            warn!(location = %job.location, "Skipping external job without title or description");
            report.skipped += 1;
            continue;
        }

        // User jobs have no dedup key.
        let Some(source) = job.source().map(str::to_string) else {
            report.skipped += 1;
            continue;
        };

        let existing = store
            .find_by_ingest_key(&job.title, &job.location, &source)
            .await
            .map_err(|e| storage_failure(report.inserted, e))?;

        if existing.is_some() {
            debug!(title = %job.title, location = %job.location, "Duplicate external job, skipping");
            report.duplicates += 1;
            continue;
        }

        store
            .insert(job)
            .await
            .map_err(|e| storage_failure(report.inserted, e))?;
        report.inserted += 1;
    }

    Ok(report)
}

fn storage_failure(inserted: usize, e: anyhow::Error) -> IngestError {
    error!(error = %e, inserted, "Job storage failed during ingestion");
    IngestError::Storage {
        inserted,
        source: e,
    }
}
