//! Request extractors

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::response::ApiError;
use crate::AppState;

/// The authenticated caller's user id, resolved from the bearer token.
///
/// Handlers that take this extractor are protected: a missing, unknown, or
/// expired session rejects with 401 before the handler runs.
pub struct CurrentUser(pub String);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        let user_id = state.auth.resolve(header).await?;
        Ok(CurrentUser(user_id))
    }
}
