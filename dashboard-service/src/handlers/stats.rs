use axum::{extract::State, response::IntoResponse, Json};
use service_core::error::AppError;

use crate::middleware::TenantContext;
use crate::AppState;

/// GET /websites/:website_id/stats
pub async fn get_stats(
    State(state): State<AppState>,
    ctx: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let stats = state.db.get_dashboard_stats(ctx.website_id).await?;
    Ok(Json(stats))
}
