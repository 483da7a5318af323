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
use crate::models::product::STATUS_ACTIVE;
use crate::models::{Product, ProductResponse, ProductUpdate};
use crate::services::ProductFilter;
use crate::utils::{not_blank, ValidatedJson};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(length(min = 1, max = 100))]
    pub sku: Option<String>,
    pub category_id: Option<Uuid>,
    #[validate(range(min = 0))]
    pub stock_quantity: Option<i32>,
    #[validate(length(min = 1, max = 50))]
    pub status: Option<String>,
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(length(min = 1, max = 100))]
    pub sku: Option<String>,
    pub category_id: Option<Uuid>,
    #[validate(range(min = 0))]
    pub stock_quantity: Option<i32>,
    #[validate(length(min = 1, max = 50))]
    pub status: Option<String>,
    pub images: Option<Vec<String>>,
}

/// GET /websites/:website_id/products
pub async fn list_products(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(query): Query<ProductListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = ProductFilter {
        search: query.search,
        status: query.status,
    };
    let products = state.db.list_products(ctx.website_id, &filter).await?;

    Ok(Json(
        products
            .into_iter()
            .map(ProductResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// POST /websites/:website_id/products
pub async fn create_product(
    State(state): State<AppState>,
    ctx: TenantContext,
    ValidatedJson(req): ValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    let product = Product::new(
        ctx.website_id,
        req.name,
        req.description,
        req.price,
        req.sku,
        req.category_id,
        req.stock_quantity.unwrap_or(0),
        req.status.unwrap_or_else(|| STATUS_ACTIVE.to_string()),
        req.images.unwrap_or_default(),
    );
    state.db.insert_product(&product).await?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// PATCH /websites/:website_id/products/:product_id
pub async fn update_product(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path((_, product_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(req): ValidatedJson<UpdateProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    let update = ProductUpdate {
        name: req.name,
        description: req.description,
        price: req.price,
        sku: req.sku,
        category_id: req.category_id,
        stock_quantity: req.stock_quantity,
        status: req.status,
        images: req.images,
    };

    let product = state
        .db
        .update_product(ctx.website_id, product_id, update)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Product not found")))?;

    Ok(Json(ProductResponse::from(product)))
}

/// DELETE /websites/:website_id/products/:product_id
pub async fn delete_product(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path((_, product_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state.db.delete_product(ctx.website_id, product_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Product not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_body_uses_camel_case_keys() {
        let req: CreateProductRequest = serde_json::from_value(serde_json::json!({
            "name": "Desk lamp",
            "stockQuantity": 12,
        }))
        .unwrap();

        assert_eq!(req.stock_quantity, Some(12));
        assert!(req.validate().is_ok());
    }
}
