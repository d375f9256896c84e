use crate::common::{JobId, UserId};
use crate::domains::jobs::errors::JobError;
use crate::domains::jobs::models::{JobQuery, JobWithCreator};
use crate::kernel::{BaseJobStore, BaseUserStore};

/// Jobs matching `query`, newest first
pub async fn list_jobs(
    query: &JobQuery,
    jobs: &dyn BaseJobStore,
) -> Result<Vec<JobWithCreator>, JobError> {
    Ok(jobs.query(query).await?)
}

/// Jobs posted by one user, newest first
pub async fn list_jobs_by_user(
    user_id: UserId,
    users: &dyn BaseUserStore,
    jobs: &dyn BaseJobStore,
) -> Result<Vec<JobWithCreator>, JobError> {
    let user = users
        .find_by_id(user_id)
        .await?
        .ok_or(JobError::UserNotFound)?;

    Ok(jobs.query(&JobQuery::by_creator(user.id)).await?)
}

pub async fn get_job(id: JobId, jobs: &dyn BaseJobStore) -> Result<JobWithCreator, JobError> {
    jobs.find_by_id(id).await?.ok_or(JobError::JobNotFound)
}
