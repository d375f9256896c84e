//! User domain actions

mod ensure_user;

pub use ensure_user::ensure_user;
