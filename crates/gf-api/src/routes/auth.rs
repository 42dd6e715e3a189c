//! Authentication endpoints

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use gf_core::UserProfile;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::extract::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token plus the freshly composed profile.
#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: UserProfile,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> Result<Json<ApiResponse<AuthPayload>>, ApiError> {
    let (token, user) = state
        .auth
        .signup(&input.name, &input.email, &input.password)
        .await?;
    let profile = state.profiles.compose(&user.id).await?;
    Ok(Json(ApiResponse::success(AuthPayload {
        token,
        user: profile,
    })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthPayload>>, ApiError> {
    let (token, user) = state.auth.login(&input.email, &input.password).await?;
    let profile = state.profiles.compose(&user.id).await?;
    Ok(Json(ApiResponse::success(AuthPayload {
        token,
        user: profile,
    })))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    // Only live sessions may log out; anything else is a plain 401.
    state.auth.resolve(header).await?;
    state.auth.logout(header).await?;
    Ok(Json(ApiResponse::success(json!({ "loggedOut": true }))))
}

pub async fn me(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let profile = state.profiles.compose(&user_id).await?;
    Ok(Json(ApiResponse::success(profile)))
}
