use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use service_core::error::AppError;
use uuid::Uuid;

use crate::middleware::TenantContext;
use crate::models::WebsiteUserResponse;
use crate::services::UserFilter;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub search: Option<String>,
    pub role: Option<String>,
}

/// GET /websites/:website_id/users
pub async fn list_users(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(query): Query<UserListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = UserFilter {
        search: query.search,
        role: query.role,
    };
    let users = state.db.list_website_users(ctx.website_id, &filter).await?;

    Ok(Json(
        users
            .into_iter()
            .map(WebsiteUserResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// POST /websites/:website_id/users
///
/// Creating accounts on behalf of other people needs an invitation flow,
/// which does not exist yet. Until then this endpoint always returns 501.
pub async fn create_user(ctx: TenantContext) -> Result<impl IntoResponse, AppError> {
    tracing::warn!(
        website_id = %ctx.website_id,
        "Rejected user creation attempt: invitation flow not available"
    );
    Err::<(), _>(AppError::NotImplemented(
        "User creation requires an invitation flow, which is not available yet".to_string(),
    ))
}

/// DELETE /websites/:website_id/users/:user_id
///
/// Revokes the user's access grant. Their account and profile are untouched.
pub async fn revoke_user(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path((_, user_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    if !ctx.can_manage() {
        return Err(AppError::Forbidden(anyhow::anyhow!(
            "Admin role required to manage users"
        )));
    }

    let deleted = state.db.delete_access(ctx.website_id, user_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "No access grant for this user"
        )));
    }

    tracing::info!(website_id = %ctx.website_id, revoked_user = %user_id, "Access revoked");

    Ok(StatusCode::NO_CONTENT)
}
