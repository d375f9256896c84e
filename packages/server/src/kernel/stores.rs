//! Postgres-backed store adapters (implement the Base*Store traits)

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use super::{BaseJobStore, BaseUserStore};
use crate::common::{JobId, UserId};
use crate::domains::jobs::models::{Job, JobQuery, JobWithCreator, NewJob};
use crate::domains::users::models::{NewUser, User};

#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseJobStore for PgJobStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database ping failed")?;
        Ok(())
    }

    async fn insert(&self, job: NewJob) -> Result<Job> {
        Job::insert(&job, &self.pool)
            .await
            .context("Failed to insert job")
    }

    async fn find_by_ingest_key(
        &self,
        title: &str,
        location: &str,
        source: &str,
    ) -> Result<Option<Job>> {
        Job::find_by_ingest_key(title, location, source, &self.pool)
            .await
            .context("Failed to look up job by ingest key")
    }

    async fn find_by_id(&self, id: JobId) -> Result<Option<JobWithCreator>> {
        Job::find_with_creator(id, &self.pool)
            .await
            .context("Failed to load job")
    }

    async fn query(&self, query: &JobQuery) -> Result<Vec<JobWithCreator>> {
        Job::query(query, &self.pool)
            .await
            .context("Failed to query jobs")
    }

    async fn save(&self, job: &Job) -> Result<Job> {
        job.save(&self.pool).await.context("Failed to save job")
    }

    async fn delete(&self, id: JobId) -> Result<bool> {
        Job::delete(id, &self.pool)
            .await
            .context("Failed to delete job")
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseUserStore for PgUserStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        User::find_by_id(id, &self.pool)
            .await
            .context("Failed to load user")
    }

    async fn find_by_auth0_id(&self, auth0_id: &str) -> Result<Option<User>> {
        User::find_by_auth0_id(auth0_id, &self.pool)
            .await
            .context("Failed to load user by subject")
    }

    async fn insert_or_get(&self, user: NewUser) -> Result<User> {
        User::insert_or_get(&user, &self.pool)
            .await
            .context("Failed to insert user")
    }
}
