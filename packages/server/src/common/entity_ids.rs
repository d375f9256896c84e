//! Typed ids for the persisted entities.

use super::id::Id;

/// Marker for job postings.
pub struct Job;

/// Marker for user accounts.
pub struct User;

pub type JobId = Id<Job>;
pub type UserId = Id<User>;
