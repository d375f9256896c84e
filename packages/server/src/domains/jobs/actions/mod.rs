//! Job domain actions - business logic functions
//!
//! Actions take the store traits directly so HTTP handlers, the CLI and tests
//! all share them.

mod create_job;
mod engagement;
mod manage;
mod queries;

pub use create_job::create_job;
pub use engagement::{apply_to_job, toggle_job_like};
pub use manage::{delete_job, update_job};
pub use queries::{get_job, list_jobs, list_jobs_by_user};
