//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod jsearch_client;
pub mod scheduled_tasks;
pub mod stores;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use jsearch_client::{JSearchClient, NoopJobSource, JSEARCH_SOURCE};
pub use scheduled_tasks::{run_scheduled_ingest, start_scheduler};
pub use stores::{PgJobStore, PgUserStore};
pub use test_dependencies::TestDependencies;
pub use traits::*;
