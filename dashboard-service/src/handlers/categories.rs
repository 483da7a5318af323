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
use crate::models::{Category, CategoryResponse};
use crate::utils::{not_blank, ValidatedJson};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryListQuery {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub name: String,
}

/// GET /websites/:website_id/categories
pub async fn list_categories(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(query): Query<CategoryListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let categories = state
        .db
        .list_categories(ctx.website_id, query.search.as_deref())
        .await?;

    Ok(Json(
        categories
            .into_iter()
            .map(CategoryResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// POST /websites/:website_id/categories
pub async fn create_category(
    State(state): State<AppState>,
    ctx: TenantContext,
    ValidatedJson(req): ValidatedJson<CreateCategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let category = Category::new(ctx.website_id, req.name);
    state.db.insert_category(&category).await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// PATCH /websites/:website_id/categories/:category_id
pub async fn update_category(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path((_, category_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(req): ValidatedJson<UpdateCategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let category = state
        .db
        .update_category(ctx.website_id, category_id, &req.name)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Category not found")))?;

    Ok(Json(CategoryResponse::from(category)))
}

/// DELETE /websites/:website_id/categories/:category_id
pub async fn delete_category(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path((_, category_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state.db.delete_category(ctx.website_id, category_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Category not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}
