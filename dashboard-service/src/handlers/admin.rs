use axum::{extract::State, response::IntoResponse, Json};
use service_core::error::AppError;

use crate::models::AdminWebsiteResponse;
use crate::AppState;

/// GET /admin/websites
///
/// Every website in the system with its owner's profile. Guarded by the
/// superadmin middleware at the router level.
pub async fn list_all_websites(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let websites = state.db.list_websites_with_owners().await?;

    Ok(Json(
        websites
            .into_iter()
            .map(AdminWebsiteResponse::from)
            .collect::<Vec<_>>(),
    ))
}
