use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::common::UserId;
use crate::domains::jobs::models::CreatorSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Jobseeker,
    Recruiter,
}

/// User model - SQL persistence layer
///
/// Keyed by the identity-provider subject (`auth0_id`), which never changes
/// once the row exists.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: UserId,
    pub auth0_id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub profile_picture: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile data taken from a verified token on first sight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub auth0_id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub profile_picture: String,
}

impl NewUser {
    pub fn into_user(self, now: DateTime<Utc>) -> User {
        User {
            id: UserId::new(),
            auth0_id: self.auth0_id,
            email: self.email,
            name: self.name,
            role: self.role,
            profile_picture: self.profile_picture,
            created_at: now,
            updated_at: now,
        }
    }
}

impl User {
    pub fn summary(&self) -> CreatorSummary {
        CreatorSummary {
            id: self.id,
            name: self.name.clone(),
            profile_picture: self.profile_picture.clone(),
        }
    }

    /// Find user by ID
    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find user by identity-provider subject
    pub async fn find_by_auth0_id(auth0_id: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE auth0_id = $1")
            .bind(auth0_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert a user, or return the existing row when the subject is taken
    /// by a concurrent first login.
    pub async fn insert_or_get(new_user: &NewUser, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO users (id, auth0_id, email, name, role, profile_picture)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (auth0_id) DO UPDATE SET auth0_id = EXCLUDED.auth0_id
             RETURNING *",
        )
        .bind(UserId::new())
        .bind(&new_user.auth0_id)
        .bind(&new_user.email)
        .bind(&new_user.name)
        .bind(new_user.role)
        .bind(&new_user.profile_picture)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
