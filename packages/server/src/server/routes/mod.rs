// HTTP routes
pub mod health;
pub mod ingest;
pub mod jobs;
pub mod root;

pub use health::*;
pub use ingest::*;
pub use jobs::*;
pub use root::*;
