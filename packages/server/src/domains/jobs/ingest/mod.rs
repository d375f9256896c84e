//! External job ingestion: normalizer + deduplicating ingestor.

mod ingestor;
pub mod normalize;

pub use ingestor::{ingest_external_jobs, store_new_jobs, IngestError, IngestReport};
pub use normalize::{join_location, normalize_external_job, FALLBACK_SALARY};
