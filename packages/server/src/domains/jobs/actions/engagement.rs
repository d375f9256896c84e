//! Applying to and liking jobs

use tracing::debug;

use crate::common::JobId;
use crate::domains::jobs::errors::JobError;
use crate::domains::jobs::models::JobWithCreator;
use crate::domains::users::User;
use crate::kernel::BaseJobStore;

/// Add `user` to the job's applicants. Applying twice is rejected.
pub async fn apply_to_job(
    id: JobId,
    user: &User,
    jobs: &dyn BaseJobStore,
) -> Result<JobWithCreator, JobError> {
    let JobWithCreator { mut job, creator } =
        jobs.find_by_id(id).await?.ok_or(JobError::JobNotFound)?;

    if !job.add_applicant(user.id) {
        return Err(JobError::AlreadyApplied);
    }

    let job = jobs.save(&job).await?;
    debug!(job_id = %job.id, user_id = %user.id, "Applied to job");

    Ok(JobWithCreator { job, creator })
}

/// Like the job, or remove the like if `user` already liked it.
pub async fn toggle_job_like(
    id: JobId,
    user: &User,
    jobs: &dyn BaseJobStore,
) -> Result<JobWithCreator, JobError> {
    let JobWithCreator { mut job, creator } =
        jobs.find_by_id(id).await?.ok_or(JobError::JobNotFound)?;

    let liked = job.toggle_like(user.id);

    let job = jobs.save(&job).await?;
    debug!(job_id = %job.id, user_id = %user.id, liked, "Toggled job like");

    Ok(JobWithCreator { job, creator })
}
