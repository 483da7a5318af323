//! Website - the tenant root. Every other content entity is scoped to one.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_THEME: &str = "default";

#[derive(Debug, Clone, FromRow)]
pub struct Website {
    pub id: Uuid,
    pub name: String,
    pub domain: String,
    pub theme: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Website {
    pub fn new(name: String, domain: String, theme: Option<String>, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            domain,
            theme: theme.unwrap_or_else(|| DEFAULT_THEME.to_string()),
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// API shape for a website.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteResponse {
    pub id: Uuid,
    pub name: String,
    pub domain: String,
    pub theme: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Website> for WebsiteResponse {
    fn from(w: Website) -> Self {
        Self {
            id: w.id,
            name: w.name,
            domain: w.domain,
            theme: w.theme,
            owner_id: w.owner_id,
            created_at: w.created_at,
            updated_at: w.updated_at,
        }
    }
}

/// Website row joined with its owner's profile, for the admin panel.
/// Owner fields are null when the owner never completed a profile.
#[derive(Debug, Clone, FromRow)]
pub struct WebsiteWithOwner {
    pub id: Uuid,
    pub name: String,
    pub domain: String,
    pub theme: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
}

/// API shape for the admin websites list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminWebsiteResponse {
    pub id: Uuid,
    pub name: String,
    pub domain: String,
    pub theme: String,
    pub owner_id: Uuid,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WebsiteWithOwner> for AdminWebsiteResponse {
    fn from(w: WebsiteWithOwner) -> Self {
        Self {
            id: w.id,
            name: w.name,
            domain: w.domain,
            theme: w.theme,
            owner_id: w.owner_id,
            owner_name: w.owner_name,
            owner_email: w.owner_email,
            created_at: w.created_at,
            updated_at: w.updated_at,
        }
    }
}
