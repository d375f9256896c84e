// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (normalizing, dedup, ownership checks) lives in domain
// functions that take these traits.
//
// Naming convention: Base* for trait names (e.g., BaseJobStore, BaseJobSource)

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::common::{JobId, UserId};
use crate::domains::jobs::models::{Job, JobQuery, JobWithCreator, NewJob};
use crate::domains::users::models::{NewUser, User};

// =============================================================================
// External Job Source (Infrastructure)
// =============================================================================

/// One listing as returned by the external job-search provider.
///
/// Every field is optional on the wire; the normalizer decides the fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalJob {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub job_city: Option<String>,
    #[serde(default)]
    pub job_state: Option<String>,
    #[serde(default)]
    pub job_country: Option<String>,
    #[serde(default)]
    pub job_min_salary: Option<f64>,
    #[serde(default)]
    pub job_employment_type: Option<String>,
    #[serde(default)]
    pub job_required_skills: Option<Vec<String>>,
    #[serde(default)]
    pub employer_website: Option<String>,
}

#[async_trait]
pub trait BaseJobSource: Send + Sync {
    /// Provenance marker stamped on every job this source produces
    fn source_name(&self) -> &str;

    /// Fetch the first page of listings for the configured query
    async fn fetch_jobs(&self) -> Result<Vec<ExternalJob>>;
}

// =============================================================================
// Job Store (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseJobStore: Send + Sync {
    /// Cheap liveness probe for health checks
    async fn ping(&self) -> Result<()>;

    async fn insert(&self, job: NewJob) -> Result<Job>;

    /// Find an ingested job by (title, location, source)
    async fn find_by_ingest_key(
        &self,
        title: &str,
        location: &str,
        source: &str,
    ) -> Result<Option<Job>>;

    async fn find_by_id(&self, id: JobId) -> Result<Option<JobWithCreator>>;

    /// Jobs matching `query`, newest first
    async fn query(&self, query: &JobQuery) -> Result<Vec<JobWithCreator>>;

    /// Persist all mutable fields of an existing job
    async fn save(&self, job: &Job) -> Result<Job>;

    /// Returns `false` if there was nothing to delete
    async fn delete(&self, id: JobId) -> Result<bool>;
}

// =============================================================================
// User Store (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseUserStore: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;

    async fn find_by_auth0_id(&self, auth0_id: &str) -> Result<Option<User>>;

    /// Insert, or return the row that already holds `auth0_id`
    async fn insert_or_get(&self, user: NewUser) -> Result<User>;
}
