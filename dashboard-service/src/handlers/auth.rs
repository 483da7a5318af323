use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use validator::Validate;

use crate::middleware::CurrentUser;
use crate::models::{Profile, ProfileResponse, User};
use crate::services::TokenResponse;
use crate::utils::{Password, PasswordHashString, ValidatedJson};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub token: TokenResponse,
    pub user: ProfileResponse,
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if state.db.find_user_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "An account with this email already exists"
        )));
    }

    let hash = Password::new(req.password).hash()?;
    let user = User::new(req.email.to_lowercase(), hash.into_string());
    state.db.insert_user(&user).await?;

    let profile = Profile::new(user.user_id, req.name, user.email.clone());
    state.db.insert_profile(&profile).await?;

    let access_token = state
        .jwt
        .generate_access_token(&user.user_id.to_string(), &user.email)?;

    tracing::info!(user_id = %user.user_id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: TokenResponse {
                access_token,
                token_type: "Bearer".to_string(),
                expires_in: state.jwt.access_token_expiry_seconds(),
            },
            user: profile.into(),
        }),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Same message for unknown email and wrong password
    let invalid = || AppError::Unauthorized(anyhow::anyhow!("Invalid email or password"));

    let user = state
        .db
        .find_user_by_email(&req.email)
        .await?
        .ok_or_else(invalid)?;

    PasswordHashString::new(user.password_hash.clone())
        .verify(&Password::new(req.password))
        .map_err(|_| invalid())?;

    let profile = state
        .db
        .find_profile_by_user_id(user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Profile not found")))?;

    let access_token = state
        .jwt
        .generate_access_token(&user.user_id.to_string(), &user.email)?;

    tracing::info!(user_id = %user.user_id, "User logged in");

    Ok(Json(AuthResponse {
        token: TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: state.jwt.access_token_expiry_seconds(),
        },
        user: profile.into(),
    }))
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let user_id = current_user.user_id()?;

    let profile = state
        .db
        .find_profile_by_user_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Profile not found")))?;

    Ok(Json(ProfileResponse::from(profile)))
}
