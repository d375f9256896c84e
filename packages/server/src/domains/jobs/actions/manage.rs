//! Owner-only update and delete

use tracing::info;

use crate::common::JobId;
use crate::domains::jobs::data::UpdateJobInput;
use crate::domains::jobs::errors::JobError;
use crate::domains::jobs::models::JobWithCreator;
use crate::domains::users::User;
use crate::kernel::BaseJobStore;

/// Apply the provided fields to a job the caller owns.
///
/// Ingested jobs have no owner and cannot be edited through the API.
pub async fn update_job(
    id: JobId,
    input: UpdateJobInput,
    user: &User,
    jobs: &dyn BaseJobStore,
) -> Result<JobWithCreator, JobError> {
    let JobWithCreator { mut job, creator } =
        jobs.find_by_id(id).await?.ok_or(JobError::JobNotFound)?;

    if !job.is_owned_by(user.id) {
        return Err(JobError::NotOwner("update"));
    }

    input.apply_to(&mut job)?;
    let job = jobs.save(&job).await?;

    info!(job_id = %job.id, "Job updated");
    Ok(JobWithCreator { job, creator })
}

/// Delete a job the caller owns.
pub async fn delete_job(id: JobId, user: &User, jobs: &dyn BaseJobStore) -> Result<(), JobError> {
    let JobWithCreator { job, .. } = jobs.find_by_id(id).await?.ok_or(JobError::JobNotFound)?;

    if !job.is_owned_by(user.id) {
        return Err(JobError::NotOwner("delete"));
    }

    // Lost a race with another delete
    if !jobs.delete(job.id).await? {
        return Err(JobError::JobNotFound);
    }

    info!(job_id = %job.id, "Job deleted");
    Ok(())
}
