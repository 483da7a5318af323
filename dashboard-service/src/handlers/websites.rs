use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::{CurrentUser, TenantContext};
use crate::models::access::ACCESS_ROLE_ADMIN;
use crate::models::{Website, WebsiteAccess, WebsiteResponse};
use crate::utils::{not_blank, ValidatedJson};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebsiteRequest {
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub name: String,
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub domain: String,
    #[validate(length(min = 1, max = 50))]
    pub theme: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWebsiteRequest {
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub domain: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub theme: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectWebsiteRequest {
    pub website_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteListResponse {
    pub websites: Vec<WebsiteResponse>,
    pub selected_website_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    pub selected_website_id: Option<Uuid>,
}

/// GET /websites
///
/// Returns the caller's websites together with their current selection.
/// Selection maintenance happens here: a selection pointing at a website
/// no longer in the list is cleared, and an empty selection is auto-filled
/// with the first (newest) website when one exists.
pub async fn list_websites(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let user_id = current_user.user_id()?;

    let profile = state
        .db
        .find_profile_by_user_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Profile not found")))?;

    let websites = state
        .db
        .list_websites_for_user(user_id, profile.is_superadmin())
        .await?;

    let current = profile
        .selected_website_id
        .filter(|id| websites.iter().any(|w| w.id == *id));
    let selected = current.or_else(|| websites.first().map(|w| w.id));

    if selected != profile.selected_website_id {
        state.db.update_selected_website(user_id, selected).await?;
    }

    Ok(Json(WebsiteListResponse {
        websites: websites.into_iter().map(WebsiteResponse::from).collect(),
        selected_website_id: selected,
    }))
}

/// POST /websites
///
/// Creates the website, grants the creator the admin role on it, and makes
/// it the creator's selected website.
pub async fn create_website(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(req): ValidatedJson<CreateWebsiteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = current_user.user_id()?;

    let website = Website::new(
        req.name.trim().to_string(),
        req.domain.trim().to_string(),
        req.theme,
        user_id,
    );
    let grant = WebsiteAccess::new(user_id, website.id, ACCESS_ROLE_ADMIN.to_string());

    state.db.insert_website_with_owner(&website, &grant).await?;
    state
        .db
        .update_selected_website(user_id, Some(website.id))
        .await?;

    tracing::info!(website_id = %website.id, owner_id = %user_id, "Website created");

    Ok((StatusCode::CREATED, Json(WebsiteResponse::from(website))))
}

/// PATCH /websites/:website_id
pub async fn update_website(
    State(state): State<AppState>,
    ctx: TenantContext,
    ValidatedJson(req): ValidatedJson<UpdateWebsiteRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !ctx.can_manage() {
        return Err(AppError::Forbidden(anyhow::anyhow!(
            "Admin role required to change website settings"
        )));
    }

    let website = state
        .db
        .update_website(
            ctx.website_id,
            req.name.as_deref().map(str::trim),
            req.domain.as_deref().map(str::trim),
            req.theme.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Website not found")))?;

    Ok(Json(WebsiteResponse::from(website)))
}

/// DELETE /websites/:website_id
pub async fn delete_website(
    State(state): State<AppState>,
    ctx: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    if !ctx.can_manage() {
        return Err(AppError::Forbidden(anyhow::anyhow!(
            "Admin role required to delete a website"
        )));
    }

    let deleted = state.db.delete_website(ctx.website_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Website not found")));
    }

    tracing::info!(website_id = %ctx.website_id, "Website deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /websites/selection
///
/// Explicitly select a website (or clear the selection with null). The
/// target must exist and be accessible to the caller.
pub async fn select_website(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(req): Json<SelectWebsiteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = current_user.user_id()?;

    if let Some(website_id) = req.website_id {
        state
            .db
            .find_website_by_id(website_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Website not found")))?;

        let profile = state.db.find_profile_by_user_id(user_id).await?;
        let is_superadmin = profile.as_ref().is_some_and(|p| p.is_superadmin());

        if !state
            .db
            .user_can_access_website(user_id, website_id, is_superadmin)
            .await?
        {
            return Err(AppError::Forbidden(anyhow::anyhow!(
                "No access to this website"
            )));
        }
    }

    state
        .db
        .update_selected_website(user_id, req.website_id)
        .await?;

    Ok(Json(SelectionResponse {
        selected_website_id: req.website_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_body_uses_camel_case() {
        let id = Uuid::new_v4();
        let req: SelectWebsiteRequest =
            serde_json::from_value(serde_json::json!({ "websiteId": id })).unwrap();
        assert_eq!(req.website_id, Some(id));

        let cleared: SelectWebsiteRequest =
            serde_json::from_value(serde_json::json!({ "websiteId": null })).unwrap();
        assert_eq!(cleared.website_id, None);
    }

    #[test]
    fn create_request_rejects_whitespace_only_fields() {
        let blank = CreateWebsiteRequest {
            name: "   ".to_string(),
            domain: " ".to_string(),
            theme: None,
        };
        assert!(blank.validate().is_err());

        let ok = CreateWebsiteRequest {
            name: "Acme".to_string(),
            domain: "acme.com".to_string(),
            theme: None,
        };
        assert!(ok.validate().is_ok());
    }
}
