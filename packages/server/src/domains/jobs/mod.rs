//! Jobs domain - postings, engagement and external ingestion
//!
//! Layout:
//!   models/  SQL persistence (Job, NewJob, JobQuery)
//!   data/    API representation and request bodies
//!   actions/ CRUD + apply/like business logic
//!   ingest/  normalizer and deduplicating ingestor

pub mod actions;
pub mod data;
pub mod errors;
pub mod ingest;
pub mod models;

pub use data::{IngestResponse, JobData};
pub use errors::JobError;
pub use ingest::{ingest_external_jobs, normalize_external_job, IngestError, IngestReport};
pub use models::job::{Job, JobQuery, JobWithCreator, NewJob, Provenance, SalaryType};
