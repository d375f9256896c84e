use serde::Deserialize;

use crate::common::{deserialize_opt_list, deserialize_opt_number, split_comma_list, UserId};
use crate::domains::jobs::errors::JobError;
use crate::domains::jobs::models::{Job, JobQuery, NewJob, Provenance, SalaryType};

/// Body of `POST /jobs`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_number")]
    pub salary: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_opt_list")]
    pub job_type: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_opt_list")]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_opt_list")]
    pub skills: Option<Vec<String>>,
    pub salary_type: Option<SalaryType>,
    pub negotiable: Option<bool>,
    pub company_description: Option<String>,
}

impl CreateJobInput {
    /// Check required fields in the order the form shows them and build the
    /// insert for `owner`.
    pub fn validate(self, owner: UserId) -> Result<NewJob, JobError> {
        let title = required_text(self.title, "Title is required")?;
        let description = required_text(self.description, "Description is required")?;
        let location = required_text(self.location, "Location is required")?;
        let salary = required_salary(self.salary)?;
        let job_type = required_job_type(self.job_type)?;
        let tags = self
            .tags
            .ok_or_else(|| JobError::Validation("Tags are required".into()))?;
        let skills = self
            .skills
            .ok_or_else(|| JobError::Validation("Skills are required".into()))?;

        Ok(NewJob {
            title,
            description,
            location,
            salary,
            salary_type: self.salary_type.unwrap_or_default(),
            negotiable: self.negotiable.unwrap_or(false),
            job_type,
            tags,
            skills,
            company_description: self.company_description.unwrap_or_default(),
            provenance: Provenance::User(owner),
        })
    }
}

fn required_text(value: Option<String>, message: &str) -> Result<String, JobError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(JobError::Validation(message.to_string())),
    }
}

fn required_salary(value: Option<f64>) -> Result<f64, JobError> {
    match value {
        Some(s) if s != 0.0 && s.is_finite() => Ok(s),
        _ => Err(JobError::Validation("Salary is required".into())),
    }
}

fn required_job_type(value: Option<Vec<String>>) -> Result<Vec<String>, JobError> {
    match value {
        Some(types) if !types.is_empty() => Ok(types),
        _ => Err(JobError::Validation("Job Type is required".into())),
    }
}

/// Body of `PUT /jobs/:id`; absent fields are left alone
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_number")]
    pub salary: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_opt_list")]
    pub job_type: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_opt_list")]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_opt_list")]
    pub skills: Option<Vec<String>>,
    pub salary_type: Option<SalaryType>,
    pub negotiable: Option<bool>,
    pub company_description: Option<String>,
}

impl UpdateJobInput {
    /// Overwrite the provided fields. Required fields cannot be blanked; on
    /// error `job` is left untouched.
    pub fn apply_to(self, job: &mut Job) -> Result<(), JobError> {
        let title = self
            .title
            .map(|v| required_text(Some(v), "Title is required"))
            .transpose()?;
        let description = self
            .description
            .map(|v| required_text(Some(v), "Description is required"))
            .transpose()?;
        let location = self
            .location
            .map(|v| required_text(Some(v), "Location is required"))
            .transpose()?;
        let salary = self.salary.map(|v| required_salary(Some(v))).transpose()?;
        let job_type = self
            .job_type
            .map(|v| required_job_type(Some(v)))
            .transpose()?;

        if let Some(v) = title {
            job.title = v;
        }
        if let Some(v) = description {
            job.description = v;
        }
        if let Some(v) = location {
            job.location = v;
        }
        if let Some(v) = salary {
            job.salary = v;
        }
        if let Some(v) = job_type {
            job.job_type = v;
        }
        if let Some(v) = self.tags {
            job.tags = v;
        }
        if let Some(v) = self.skills {
            job.skills = v;
        }
        if let Some(v) = self.salary_type {
            job.salary_type = v;
        }
        if let Some(v) = self.negotiable {
            job.negotiable = v;
        }
        if let Some(v) = self.company_description {
            job.company_description = v;
        }
        Ok(())
    }
}

/// Query string of `GET /jobs/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub tags: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
}

impl From<SearchParams> for JobQuery {
    fn from(params: SearchParams) -> Self {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        JobQuery {
            created_by: None,
            tags: params.tags.as_deref().map(split_comma_list).unwrap_or_default(),
            location: non_blank(params.location),
            title: non_blank(params.title),
        }
    }
}
