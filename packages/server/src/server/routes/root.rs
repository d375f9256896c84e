use axum::{
    extract::Extension,
    response::{IntoResponse, Redirect, Response},
};

use crate::domains::users::ensure_user;
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;

/// `GET /` - landing for the identity provider's login callback
///
/// Signed-in callers get a user record and are sent to the web client.
pub async fn root_handler(
    Extension(state): Extension<AppState>,
    auth_user: Option<Extension<AuthUser>>,
) -> Result<Response, ApiError> {
    let Some(Extension(auth_user)) = auth_user else {
        return Ok("Logged out".into_response());
    };

    ensure_user(&auth_user.profile, state.deps.users.as_ref()).await?;
    Ok(Redirect::to(&state.client_url).into_response())
}
