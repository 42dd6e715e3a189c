//! Support ticket endpoints

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use gf_core::{SupportTicket, TicketCategory};
use serde::Deserialize;

use crate::extract::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_tickets).post(file_ticket))
}

#[derive(Debug, Deserialize)]
pub struct TicketCreate {
    pub subject: String,
    pub message: String,
    pub category: TicketCategory,
}

pub async fn list_tickets(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<ApiResponse<Vec<SupportTicket>>>, ApiError> {
    let tickets = state.tickets.list_for(&user_id).await?;
    Ok(Json(ApiResponse::success(tickets)))
}

pub async fn file_ticket(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(input): Json<TicketCreate>,
) -> Result<Json<ApiResponse<SupportTicket>>, ApiError> {
    let ticket = state
        .tickets
        .file(&user_id, &input.subject, &input.message, input.category)
        .await?;
    Ok(Json(ApiResponse::success(ticket)))
}
