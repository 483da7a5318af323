use axum::{
    extract::{FromRequestParts, Path, Request, State},
    http::request::Parts,
    middleware::Next,
    response::IntoResponse,
};
use serde::Deserialize;
use service_core::error::AppError;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::models::access::ACCESS_ROLE_ADMIN;
use crate::AppState;

/// Path params for routes nested under a website.
#[derive(Debug, Deserialize)]
pub struct WebsitePath {
    pub website_id: Uuid,
}

/// The caller's standing within the website the route is scoped to.
/// Inserted by [`website_access_middleware`]; handlers read it through the
/// extractor below and never re-check access themselves.
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub website_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
}

impl TenantContext {
    /// Admins may change website settings and manage users.
    pub fn can_manage(&self) -> bool {
        self.role == ACCESS_ROLE_ADMIN
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .cloned()
            .ok_or_else(|| {
                AppError::InternalError(anyhow::anyhow!(
                    "Tenant context missing from request extensions"
                ))
            })
    }
}

/// Middleware guarding every `/websites/:website_id/...` route.
///
/// Resolution order: the website must exist (404 otherwise), then the
/// caller must be a superadmin, the owner, or hold an access grant
/// (403 otherwise). Owners and superadmins act with the admin role even
/// without an explicit grant row.
pub async fn website_access_middleware(
    State(state): State<AppState>,
    Path(WebsitePath { website_id }): Path<WebsitePath>,
    current_user: CurrentUser,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, AppError> {
    let user_id = current_user.user_id()?;

    let website = state
        .db
        .find_website_by_id(website_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Website not found")))?;

    let profile = state.db.find_profile_by_user_id(user_id).await?;
    let is_superadmin = profile.as_ref().is_some_and(|p| p.is_superadmin());

    let role = if is_superadmin || website.owner_id == user_id {
        ACCESS_ROLE_ADMIN.to_string()
    } else {
        state
            .db
            .find_access(user_id, website_id)
            .await?
            .ok_or_else(|| {
                AppError::Forbidden(anyhow::anyhow!("No access to this website"))
            })?
            .role
    };

    req.extensions_mut().insert(TenantContext {
        website_id,
        user_id,
        role,
    });

    Ok(next.run(req).await)
}

/// Middleware guarding the `/admin` routes: superadmin role required.
pub async fn superadmin_middleware(
    State(state): State<AppState>,
    current_user: CurrentUser,
    req: Request,
    next: Next,
) -> Result<impl IntoResponse, AppError> {
    let user_id = current_user.user_id()?;

    let profile = state.db.find_profile_by_user_id(user_id).await?;
    if !profile.as_ref().is_some_and(|p| p.is_superadmin()) {
        return Err(AppError::Forbidden(anyhow::anyhow!(
            "Superadmin role required"
        )));
    }

    Ok(next.run(req).await)
}
