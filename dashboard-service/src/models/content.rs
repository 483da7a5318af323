//! Content items and the status/published_at coupling.
//!
//! `published_at` is derived, never independently settable: it is set to the
//! write time exactly when the submitted status is `published`, and cleared
//! for every other status.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_PUBLISHED: &str = "published";
pub const STATUS_REVIEW: &str = "review";

pub const DEFAULT_CONTENT_TYPE: &str = "article";

/// Derive the published timestamp for a submitted status.
pub fn published_at_for(status: &str) -> Option<DateTime<Utc>> {
    if status == STATUS_PUBLISHED {
        Some(Utc::now())
    } else {
        None
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Content {
    pub id: Uuid,
    pub website_id: Uuid,
    pub title: String,
    pub body: Option<String>,
    pub content_type: String,
    pub status: String,
    pub category_id: Option<Uuid>,
    pub author_id: Uuid,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Content {
    pub fn new(
        website_id: Uuid,
        title: String,
        body: Option<String>,
        content_type: String,
        status: String,
        category_id: Option<Uuid>,
        author_id: Uuid,
    ) -> Self {
        let now = Utc::now();
        let published_at = published_at_for(&status);
        Self {
            id: Uuid::new_v4(),
            website_id,
            title,
            body,
            content_type,
            status,
            category_id,
            author_id,
            published_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update, re-deriving `published_at` only when the
    /// update submits a status.
    pub fn apply(mut self, update: ContentUpdate) -> Self {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(body) = update.body {
            self.body = Some(body);
        }
        if let Some(content_type) = update.content_type {
            self.content_type = content_type;
        }
        if let Some(category_id) = update.category_id {
            self.category_id = Some(category_id);
        }
        if let Some(status) = update.status {
            self.published_at = published_at_for(&status);
            self.status = status;
        }
        self.updated_at = Utc::now();
        self
    }
}

/// Partial update for a content item.
#[derive(Debug, Clone, Default)]
pub struct ContentUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    pub content_type: Option<String>,
    pub status: Option<String>,
    pub category_id: Option<Uuid>,
}

/// API shape for a content item.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentResponse {
    pub id: Uuid,
    pub website_id: Uuid,
    pub title: String,
    pub body: Option<String>,
    pub content_type: String,
    pub status: String,
    pub category_id: Option<Uuid>,
    pub author_id: Uuid,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Content> for ContentResponse {
    fn from(c: Content) -> Self {
        Self {
            id: c.id,
            website_id: c.website_id,
            title: c.title,
            body: c.body,
            content_type: c.content_type,
            status: c.status,
            category_id: c.category_id,
            author_id: c.author_id,
            published_at: c.published_at,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
