// Job Board - API Core
//
// Backend for the job board: job postings, applications and likes behind a
// JSON API, plus an hourly ingest of external listings from JSearch.
//
// Business logic lives in domains/*/actions and takes the kernel traits, so
// the HTTP handlers, the scheduler and the CLI all share it.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
