// Common types and utilities shared across the application

pub mod entity_ids;
pub mod id;
pub mod lenient;

pub use entity_ids::*;
pub use id::Id;
pub use lenient::{deserialize_opt_list, deserialize_opt_number, split_comma_list};
