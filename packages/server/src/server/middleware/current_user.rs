use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::AuthUser;
use crate::domains::users::{ensure_user, User};
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// The caller's user record, created on first authenticated request.
///
/// Rejects with 401 when `jwt_auth_middleware` found no valid token.
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_user = parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(ApiError::Unauthorized)?;

        let state = parts
            .extensions
            .get::<AppState>()
            .cloned()
            .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("AppState extension missing")))?;

        let user = ensure_user(&auth_user.profile, state.deps.users.as_ref()).await?;
        Ok(CurrentUser(user))
    }
}
