use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{JobId, UserId};
use crate::domains::jobs::models::{CreatorSummary, JobWithCreator, SalaryType};

/// API representation of a job posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobData {
    #[serde(rename = "_id")]
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

    // Provenance: exactly one of these is set
    pub created_by: Option<CreatorData>,
    pub source: Option<String>,

    // Engagement
    pub applicants: Vec<UserId>,
    pub likes: Vec<UserId>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Owner fields populated onto a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorData {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub profile_picture: String,
}

impl From<CreatorSummary> for CreatorData {
    fn from(summary: CreatorSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            profile_picture: summary.profile_picture,
        }
    }
}

impl From<JobWithCreator> for JobData {
    fn from(JobWithCreator { job, creator }: JobWithCreator) -> Self {
        // An owner whose row could not be joined still shows up by id.
        let created_by = match (creator, job.created_by) {
            (Some(summary), _) => Some(summary.into()),
            (None, Some(id)) => Some(CreatorData {
                id,
                name: String::new(),
                profile_picture: String::new(),
            }),
            (None, None) => None,
        };

        Self {
            id: job.id,
            title: job.title,
            description: job.description,
            location: job.location,
            salary: job.salary,
            salary_type: job.salary_type,
            negotiable: job.negotiable,
            job_type: job.job_type,
            tags: job.tags,
            skills: job.skills,
            company_description: job.company_description,
            created_by,
            source: job.source,
            applicants: job.applicants,
            likes: job.likes,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

/// Manual ingestion response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestResponse {
    pub message: String,
    pub saved: usize,
}

impl IngestResponse {
    pub fn saved(count: usize) -> Self {
        Self {
            message: format!(
                "External jobs fetched and {} new jobs saved successfully",
                count
            ),
            saved: count,
        }
    }
}
