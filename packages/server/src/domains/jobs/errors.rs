use thiserror::Error;

/// Failures of the job API actions
#[derive(Error, Debug)]
pub enum JobError {
    #[error("Job not found")]
    JobNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Already applied for this job")]
    AlreadyApplied,

    #[error("Not authorized to {0} this job")]
    NotOwner(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
