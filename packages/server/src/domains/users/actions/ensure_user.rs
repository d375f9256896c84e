//! Ensure user action - lazily registers identity-provider subjects

use anyhow::Result;
use tracing::{debug, info};

use crate::domains::auth::IdentityProfile;
use crate::domains::users::models::{NewUser, User, UserRole};
use crate::kernel::BaseUserStore;

/// Return the user for `profile.sub`, creating a jobseeker record on first
/// sight. Existing records are returned untouched.
pub async fn ensure_user(profile: &IdentityProfile, users: &dyn BaseUserStore) -> Result<User> {
    if let Some(existing) = users.find_by_auth0_id(&profile.sub).await? {
        debug!(user_id = %existing.id, "User already exists");
        return Ok(existing);
    }

    let user = users
        .insert_or_get(NewUser {
            auth0_id: profile.sub.clone(),
            email: profile.email.clone(),
            name: profile.name.clone(),
            role: UserRole::Jobseeker,
            profile_picture: profile.picture.clone(),
        })
        .await?;

    info!(user_id = %user.id, "User added to db");
    Ok(user)
}
