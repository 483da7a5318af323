//! User profile - display identity plus the global (system-wide) role.
//!
//! The global role is independent of any per-website access role; only
//! `superadmin` changes behavior (sees every website, may use `/admin`).

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const ROLE_SUPERADMIN: &str = "superadmin";
pub const ROLE_USER: &str = "user";

#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Option<String>,
    pub selected_website_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(user_id: Uuid, name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            email,
            role: Some(ROLE_USER.to_string()),
            selected_website_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_superadmin(&self) -> bool {
        self.role.as_deref() == Some(ROLE_SUPERADMIN)
    }
}

/// API shape for a profile.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Option<String>,
    pub selected_website_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            name: p.name,
            email: p.email,
            role: p.role,
            selected_website_id: p.selected_website_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_profile_defaults_to_user_role() {
        let profile = Profile::new(Uuid::new_v4(), "Jo".into(), "jo@example.com".into());
        assert!(!profile.is_superadmin());
        assert_eq!(profile.role.as_deref(), Some(ROLE_USER));
    }

    #[test]
    fn response_uses_camel_case_fields() {
        let profile = Profile::new(Uuid::new_v4(), "Jo".into(), "jo@example.com".into());
        let json = serde_json::to_value(ProfileResponse::from(profile)).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("selectedWebsiteId").is_some());
        assert!(json.get("user_id").is_none());
    }
}
