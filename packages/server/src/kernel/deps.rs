//! Server dependencies (using traits for testability)
//!
//! The central dependency container shared by HTTP handlers and the
//! scheduler. Storage and the external job source are trait objects so tests
//! can swap in the implementations from `test_dependencies`.

use sqlx::PgPool;
use std::sync::Arc;

use super::{BaseJobSource, BaseJobStore, BaseUserStore, PgJobStore, PgUserStore};

#[derive(Clone)]
pub struct ServerDeps {
    pub jobs: Arc<dyn BaseJobStore>,
    pub users: Arc<dyn BaseUserStore>,
    pub job_source: Arc<dyn BaseJobSource>,
}

impl ServerDeps {
    pub fn new(
        jobs: Arc<dyn BaseJobStore>,
        users: Arc<dyn BaseUserStore>,
        job_source: Arc<dyn BaseJobSource>,
    ) -> Self {
        Self {
            jobs,
            users,
            job_source,
        }
    }

    /// Postgres stores sharing one pool
    pub fn postgres(pool: PgPool, job_source: Arc<dyn BaseJobSource>) -> Self {
        Self::new(
            Arc::new(PgJobStore::new(pool.clone())),
            Arc::new(PgUserStore::new(pool)),
            job_source,
        )
    }
}
