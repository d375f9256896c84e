//! Users domain - accounts keyed by identity-provider subject

pub mod actions;
pub mod models;

pub use actions::ensure_user;
pub use models::user::{NewUser, User, UserRole};
