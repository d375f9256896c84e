use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::common::{JobId, UserId};

/// Pay period for `salary`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "salary_type")]
pub enum SalaryType {
    #[default]
    Year,
    Month,
    Hour,
}

/// Job posting - SQL persistence layer
///
/// `created_by` and `source` are mutually exclusive: user postings carry the
/// owner, ingested postings carry the provider marker (see `Provenance`).
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: f64,
    pub salary_type: SalaryType,
    pub negotiable: bool,
    pub job_type: Vec<String>,
    pub tags: Vec<String>,
    pub skills: Vec<String>,
    pub company_description: String,
    pub created_by: Option<UserId>,
    pub source: Option<String>,
    pub applicants: Vec<UserId>,
    pub likes: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Who a job came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// Posted through the API by a user
    User(UserId),
    /// Pulled in by the ingestor; the marker names the provider
    External(String),
}

/// Fields for a job that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: f64,
    pub salary_type: SalaryType,
    pub negotiable: bool,
    pub job_type: Vec<String>,
    pub tags: Vec<String>,
    pub skills: Vec<String>,
    pub company_description: String,
    pub provenance: Provenance,
}

impl NewJob {
    pub fn created_by(&self) -> Option<UserId> {
        match &self.provenance {
            Provenance::User(id) => Some(*id),
            Provenance::External(_) => None,
        }
    }

    pub fn source(&self) -> Option<&str> {
        match &self.provenance {
            Provenance::User(_) => None,
            Provenance::External(marker) => Some(marker),
        }
    }

    /// Materialize the row the database would return for this insert.
    pub fn into_job(self, now: DateTime<Utc>) -> Job {
        let created_by = self.created_by();
        let source = self.source().map(str::to_string);
        Job {
            id: JobId::new(),
            title: self.title,
            description: self.description,
            location: self.location,
            salary: self.salary,
            salary_type: self.salary_type,
            negotiable: self.negotiable,
            job_type: self.job_type,
            tags: self.tags,
            skills: self.skills,
            company_description: self.company_description,
            created_by,
            source,
            applicants: Vec::new(),
            likes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Public profile fields joined onto a job's owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorSummary {
    pub id: UserId,
    pub name: String,
    pub profile_picture: String,
}

/// A job with its owner's summary populated (ingested jobs have none)
#[derive(Debug, Clone, PartialEq)]
pub struct JobWithCreator {
    pub job: Job,
    pub creator: Option<CreatorSummary>,
}

#[derive(FromRow)]
struct JobWithCreatorRow {
    #[sqlx(flatten)]
    job: Job,
    creator_name: Option<String>,
    creator_picture: Option<String>,
}

impl From<JobWithCreatorRow> for JobWithCreator {
    fn from(row: JobWithCreatorRow) -> Self {
        let creator = match (row.job.created_by, row.creator_name) {
            (Some(id), Some(name)) => Some(CreatorSummary {
                id,
                name,
                profile_picture: row.creator_picture.unwrap_or_default(),
            }),
            _ => None,
        };
        Self {
            job: row.job,
            creator,
        }
    }
}

/// Listing filter shared by "all jobs", "jobs by user" and search.
///
/// Empty filter matches everything. `tags` matches when the job carries any
/// of them; `location` and `title` are case-insensitive substring matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobQuery {
    pub created_by: Option<UserId>,
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub title: Option<String>,
}

impl JobQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_creator(user_id: UserId) -> Self {
        Self {
            created_by: Some(user_id),
            ..Self::default()
        }
    }

    pub fn matches(&self, job: &Job) -> bool {
        if let Some(owner) = self.created_by {
            if job.created_by != Some(owner) {
                return false;
            }
        }
        if !self.tags.is_empty() && !job.tags.iter().any(|t| self.tags.contains(t)) {
            return false;
        }
        if let Some(location) = &self.location {
            if !contains_ignore_case(&job.location, location) {
                return false;
            }
        }
        if let Some(title) = &self.title {
            if !contains_ignore_case(&job.title, title) {
                return false;
            }
        }
        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl Job {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.created_by == Some(user_id)
    }

    pub fn has_applicant(&self, user_id: UserId) -> bool {
        self.applicants.contains(&user_id)
    }

    /// Record an application. Returns `false` when the user already applied.
    pub fn add_applicant(&mut self, user_id: UserId) -> bool {
        if self.has_applicant(user_id) {
            return false;
        }
        self.applicants.push(user_id);
        true
    }

    /// Flip the user's like. Returns whether the job is liked afterwards.
    pub fn toggle_like(&mut self, user_id: UserId) -> bool {
        if let Some(pos) = self.likes.iter().position(|id| *id == user_id) {
            self.likes.remove(pos);
            false
        } else {
            self.likes.push(user_id);
            true
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Insert a new job
    pub async fn insert(new_job: &NewJob, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO jobs (
                id, title, description, location, salary, salary_type, negotiable,
                job_type, tags, skills, company_description, created_by, source
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING *",
        )
        .bind(JobId::new())
        .bind(&new_job.title)
        .bind(&new_job.description)
        .bind(&new_job.location)
        .bind(new_job.salary)
        .bind(new_job.salary_type)
        .bind(new_job.negotiable)
        .bind(&new_job.job_type)
        .bind(&new_job.tags)
        .bind(&new_job.skills)
        .bind(&new_job.company_description)
        .bind(new_job.created_by())
        .bind(new_job.source())
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Find an ingested job by its dedup key
    pub async fn find_by_ingest_key(
        title: &str,
        location: &str,
        source: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM jobs
             WHERE title = $1 AND location = $2 AND source = $3
             LIMIT 1",
        )
        .bind(title)
        .bind(location)
        .bind(source)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Find a job with its creator populated
    pub async fn find_with_creator(id: JobId, pool: &PgPool) -> Result<Option<JobWithCreator>> {
        let row = sqlx::query_as::<_, JobWithCreatorRow>(
            "SELECT j.*, u.name AS creator_name, u.profile_picture AS creator_picture
             FROM jobs j
             LEFT JOIN users u ON u.id = j.created_by
             WHERE j.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// List jobs matching `query`, newest first
    pub async fn query(query: &JobQuery, pool: &PgPool) -> Result<Vec<JobWithCreator>> {
        let rows = sqlx::query_as::<_, JobWithCreatorRow>(
            "SELECT j.*, u.name AS creator_name, u.profile_picture AS creator_picture
             FROM jobs j
             LEFT JOIN users u ON u.id = j.created_by
             WHERE ($1::uuid IS NULL OR j.created_by = $1)
               AND (cardinality($2::text[]) = 0 OR j.tags && $2::text[])
               AND ($3::text IS NULL OR strpos(lower(j.location), lower($3)) > 0)
               AND ($4::text IS NULL OR strpos(lower(j.title), lower($4)) > 0)
             ORDER BY j.created_at DESC, j.id DESC",
        )
        .bind(query.created_by)
        .bind(&query.tags)
        .bind(&query.location)
        .bind(&query.title)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Persist every mutable field and bump `updated_at`
    pub async fn save(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE jobs
             SET title = $2, description = $3, location = $4, salary = $5,
                 salary_type = $6, negotiable = $7, job_type = $8, tags = $9,
                 skills = $10, company_description = $11, applicants = $12,
                 likes = $13, updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(self.id)
        .bind(&self.title)
        .bind(&self.description)
        .bind(&self.location)
        .bind(self.salary)
        .bind(self.salary_type)
        .bind(self.negotiable)
        .bind(&self.job_type)
        .bind(&self.tags)
        .bind(&self.skills)
        .bind(&self.company_description)
        .bind(&self.applicants)
        .bind(&self.likes)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete a job. Returns whether a row was removed.
    pub async fn delete(id: JobId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
