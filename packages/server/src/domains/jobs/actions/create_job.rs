use tracing::info;

use crate::domains::jobs::data::CreateJobInput;
use crate::domains::jobs::errors::JobError;
use crate::domains::jobs::models::JobWithCreator;
use crate::domains::users::User;
use crate::kernel::BaseJobStore;

/// Create a job owned by `owner`.
///
/// User postings are not deduplicated.
pub async fn create_job(
    input: CreateJobInput,
    owner: &User,
    jobs: &dyn BaseJobStore,
) -> Result<JobWithCreator, JobError> {
    let new_job = input.validate(owner.id)?;
    let job = jobs.insert(new_job).await?;

    info!(job_id = %job.id, user_id = %owner.id, "Job created");

    Ok(JobWithCreator {
        job,
        creator: Some(owner.summary()),
    })
}
