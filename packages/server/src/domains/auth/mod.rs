//! Auth domain - verifies tokens issued by the hosted identity provider
//!
//! The login/logout handshake happens entirely at the provider; this API
//! only checks bearer tokens and reads the profile claims.

pub mod jwt;

pub use jwt::{Claims, IdentityProfile, JwtService};
