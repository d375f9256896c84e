// Test dependencies - in-memory implementations of the kernel traits
//
// Used by unit and integration tests (and anything else that wants a server
// without Postgres or network access).

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{BaseJobSource, BaseJobStore, BaseUserStore, ExternalJob, ServerDeps, JSEARCH_SOURCE};
use crate::common::{JobId, UserId};
use crate::domains::jobs::models::{Job, JobQuery, JobWithCreator, NewJob};
use crate::domains::users::models::{NewUser, User};

// =============================================================================
// Mock Job Source
// =============================================================================

/// Scripted external job source.
///
/// Each `fetch_jobs` call pops the next scripted response; once the script is
/// exhausted the last response repeats.
pub struct MockJobSource {
    responses: Mutex<Vec<std::result::Result<Vec<ExternalJob>, String>>>,
    calls: AtomicUsize,
}

impl MockJobSource {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_jobs(self, jobs: Vec<ExternalJob>) -> Self {
        self.responses.lock().unwrap().push(Ok(jobs));
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        self.responses.lock().unwrap().push(Err(message.to_string()));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockJobSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseJobSource for MockJobSource {
    fn source_name(&self) -> &str {
        JSEARCH_SOURCE
    }

    async fn fetch_jobs(&self) -> Result<Vec<ExternalJob>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut responses = self.responses.lock().unwrap();
        let next = if responses.len() > 1 {
            responses.remove(0)
        } else {
            responses.first().cloned().unwrap_or_else(|| Ok(Vec::new()))
        };
        next.map_err(|msg| anyhow!(msg))
    }
}

// =============================================================================
// In-memory User Store
// =============================================================================

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    fn get(&self, id: UserId) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }
}

#[async_trait]
impl BaseUserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.get(id))
    }

    async fn find_by_auth0_id(&self, auth0_id: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.auth0_id == auth0_id)
            .cloned())
    }

    async fn insert_or_get(&self, user: NewUser) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.iter().find(|u| u.auth0_id == user.auth0_id) {
            return Ok(existing.clone());
        }
        let user = user.into_user(Utc::now());
        users.push(user.clone());
        Ok(user)
    }
}

// =============================================================================
// In-memory Job Store
// =============================================================================

/// Job store backed by a `Vec`, with optional failure injection.
pub struct InMemoryJobStore {
    jobs: Mutex<Vec<Job>>,
    users: Option<Arc<InMemoryUserStore>>,
    inserts: AtomicUsize,
    fail_on_insert: Option<usize>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
            users: None,
            inserts: AtomicUsize::new(0),
            fail_on_insert: None,
        }
    }

    /// Resolve creators from `users` when listing
    pub fn with_users(mut self, users: Arc<InMemoryUserStore>) -> Self {
        self.users = Some(users);
        self
    }

    /// Make the `nth` insert attempt (1-based) fail with a storage error
    pub fn fail_on_insert(mut self, nth: usize) -> Self {
        self.fail_on_insert = Some(nth);
        self
    }

    pub fn len(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn all(&self) -> Vec<Job> {
        self.jobs.lock().unwrap().clone()
    }

    fn with_creator(&self, job: Job) -> JobWithCreator {
        let creator = match (&self.users, job.created_by) {
            (Some(users), Some(owner)) => users.get(owner).map(|u| u.summary()),
            _ => None,
        };
        JobWithCreator { job, creator }
    }
}

impl Default for InMemoryJobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseJobStore for InMemoryJobStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn insert(&self, job: NewJob) -> Result<Job> {
        let attempt = self.inserts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_insert == Some(attempt) {
            return Err(anyhow!("injected storage failure on insert {}", attempt));
        }

        let job = job.into_job(Utc::now());
        self.jobs.lock().unwrap().push(job.clone());
        Ok(job)
    }

    async fn find_by_ingest_key(
        &self,
        title: &str,
        location: &str,
        source: &str,
    ) -> Result<Option<Job>> {
        Ok(self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .find(|j| j.title == title && j.location == location && j.source.as_deref() == Some(source))
            .cloned())
    }

    async fn find_by_id(&self, id: JobId) -> Result<Option<JobWithCreator>> {
        let job = self.jobs.lock().unwrap().iter().find(|j| j.id == id).cloned();
        Ok(job.map(|j| self.with_creator(j)))
    }

    async fn query(&self, query: &JobQuery) -> Result<Vec<JobWithCreator>> {
        let mut matched: Vec<Job> = self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|j| query.matches(j))
            .cloned()
            .collect();
        // Newest first; ids are time ordered so they break timestamp ties.
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(matched.into_iter().map(|j| self.with_creator(j)).collect())
    }

    async fn save(&self, job: &Job) -> Result<Job> {
        let mut jobs = self.jobs.lock().unwrap();
        let slot = jobs
            .iter_mut()
            .find(|j| j.id == job.id)
            .ok_or_else(|| anyhow!("job {} does not exist", job.id))?;
        *slot = Job {
            updated_at: Utc::now(),
            ..job.clone()
        };
        Ok(slot.clone())
    }

    async fn delete(&self, id: JobId) -> Result<bool> {
        let mut jobs = self.jobs.lock().unwrap();
        let before = jobs.len();
        jobs.retain(|j| j.id != id);
        Ok(jobs.len() < before)
    }
}

// =============================================================================
// Test dependency bundle
// =============================================================================

/// In-memory stores plus a mock source, with handles kept for assertions
pub struct TestDependencies {
    pub jobs: Arc<InMemoryJobStore>,
    pub users: Arc<InMemoryUserStore>,
    pub job_source: Arc<MockJobSource>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self::with_source(MockJobSource::new())
    }

    pub fn with_source(source: MockJobSource) -> Self {
        let users = Arc::new(InMemoryUserStore::new());
        Self {
            jobs: Arc::new(InMemoryJobStore::new().with_users(users.clone())),
            users,
            job_source: Arc::new(source),
        }
    }

    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(self.jobs.clone(), self.users.clone(), self.job_source.clone())
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
