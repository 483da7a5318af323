use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use service_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::TenantContext;
use crate::models::content::{DEFAULT_CONTENT_TYPE, STATUS_DRAFT};
use crate::models::{Content, ContentResponse, ContentUpdate};
use crate::services::ContentFilter;
use crate::utils::{not_blank, ValidatedJson};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentRequest {
    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub title: String,
    pub body: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub content_type: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub status: Option<String>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContentRequest {
    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub title: Option<String>,
    pub body: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub content_type: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub status: Option<String>,
    pub category_id: Option<Uuid>,
}

/// GET /websites/:website_id/content
pub async fn list_content(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(query): Query<ContentListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = ContentFilter {
        search: query.search,
        status: query.status,
        category_id: query.category_id,
    };
    let items = state.db.list_content(ctx.website_id, &filter).await?;

    Ok(Json(
        items
            .into_iter()
            .map(ContentResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// POST /websites/:website_id/content
///
/// New items default to a draft article; `published_at` follows the status.
pub async fn create_content(
    State(state): State<AppState>,
    ctx: TenantContext,
    ValidatedJson(req): ValidatedJson<CreateContentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let content = Content::new(
        ctx.website_id,
        req.title,
        req.body,
        req.content_type
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
        req.status.unwrap_or_else(|| STATUS_DRAFT.to_string()),
        req.category_id,
        ctx.user_id,
    );
    state.db.insert_content(&content).await?;

    Ok((StatusCode::CREATED, Json(ContentResponse::from(content))))
}

/// PATCH /websites/:website_id/content/:content_id
pub async fn update_content(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path((_, content_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(req): ValidatedJson<UpdateContentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let update = ContentUpdate {
        title: req.title,
        body: req.body,
        content_type: req.content_type,
        status: req.status,
        category_id: req.category_id,
    };

    let content = state
        .db
        .update_content(ctx.website_id, content_id, update)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Content not found")))?;

    Ok(Json(ContentResponse::from(content)))
}

/// DELETE /websites/:website_id/content/:content_id
pub async fn delete_content(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path((_, content_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state.db.delete_content(ctx.website_id, content_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Content not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_body_uses_camel_case_keys() {
        let category_id = Uuid::new_v4();
        let req: CreateContentRequest = serde_json::from_value(serde_json::json!({
            "title": "Launch notes",
            "contentType": "page",
            "categoryId": category_id,
        }))
        .unwrap();

        assert_eq!(req.content_type.as_deref(), Some("page"));
        assert_eq!(req.category_id, Some(category_id));
    }

    #[test]
    fn update_body_rejects_blank_title() {
        let req: UpdateContentRequest =
            serde_json::from_value(serde_json::json!({ "title": "   " })).unwrap();
        assert!(req.validate().is_err());
    }
}
