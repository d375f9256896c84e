// HTTP middleware
pub mod current_user;
pub mod jwt_auth;

pub use current_user::*;
pub use jwt_auth::*;
