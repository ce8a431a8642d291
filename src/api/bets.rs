//! Betting pool API endpoints.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};

use super::{ack, created, Ack, ApiResult, CreatedResult, MAX_NAME_LEN};
use crate::auth;
use crate::errors::AppError;
use crate::models::{Bet, CreateBetRequest};
use crate::AppState;

/// GET /api/bets - List all bets.
pub async fn list_bets(State(state): State<AppState>) -> Json<Vec<Bet>> {
    Json(state.repo.list_bets().await)
}

/// POST /api/bets - Place a bet.
pub async fn create_bet(
    State(state): State<AppState>,
    Json(request): Json<CreateBetRequest>,
) -> CreatedResult<Bet> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if request.name.trim().chars().count() > MAX_NAME_LEN {
        return Err(AppError::Validation(format!(
            "Name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    if request.date.trim().is_empty() {
        return Err(AppError::Validation("Date is required".to_string()));
    }

    let bet = state.repo.create_bet(&request).await?;
    created(bet)
}

/// DELETE /api/bets/:id - Delete a bet.
pub async fn delete_bet(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Ack> {
    auth::require_pin(&state.config, &headers)?;
    state.repo.delete_bet(&id).await?;
    Ok(ack())
}
