//! Website access grants and the joined "website user" view.
//!
//! A grant is a (user, website, role) triple. The Users page shows grants
//! merged with profile data; a grant whose profile is missing is still
//! listed, with placeholder fields, rather than silently dropped.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::profile::Profile;

pub const ACCESS_ROLE_ADMIN: &str = "admin";

/// Placeholder used when a grant has no matching profile.
pub const UNKNOWN_USER: &str = "Unknown";

#[derive(Debug, Clone, FromRow)]
pub struct WebsiteAccess {
    pub id: Uuid,
    pub user_id: Uuid,
    pub website_id: Uuid,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl WebsiteAccess {
    pub fn new(user_id: Uuid, website_id: Uuid, role: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            website_id,
            role,
            created_at: Utc::now(),
        }
    }
}

/// One row of the Users page: an access grant merged with its profile.
#[derive(Debug, Clone)]
pub struct WebsiteUser {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub granted_at: DateTime<Utc>,
}

impl WebsiteUser {
    /// Merge a grant with its profile. Missing profiles get placeholders so
    /// the grant stays visible (and revocable) in the UI.
    pub fn from_grant(grant: WebsiteAccess, profile: Option<&Profile>) -> Self {
        let (name, email) = match profile {
            Some(p) => (p.name.clone(), p.email.clone()),
            None => (UNKNOWN_USER.to_string(), UNKNOWN_USER.to_string()),
        };
        Self {
            user_id: grant.user_id,
            name,
            email,
            role: grant.role,
            granted_at: grant.created_at,
        }
    }
}

/// API shape for a website user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteUserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<WebsiteUser> for WebsiteUserResponse {
    fn from(u: WebsiteUser) -> Self {
        Self {
            id: u.user_id,
            name: u.name,
            email: u.email,
            role: u.role,
            created_at: u.granted_at,
        }
    }
}
