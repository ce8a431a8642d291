//! Name suggestion API endpoints.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts, Path, State},
    http::{request::Parts, HeaderMap},
    Json,
};

use super::{ack, created, Ack, ApiResult, CreatedResult};
use crate::auth;
use crate::errors::AppError;
use crate::models::{CreateNameRequest, NameSuggestion, VoteRequest, UNKNOWN_VOTER};
use crate::AppState;

/// Maximum length of a suggested name.
pub const MAX_NAME_LEN: usize = 50;

/// Weak deduplication key for voting, derived from the caller's
/// network address.
///
/// The first `x-forwarded-for` entry wins, then the peer address.
/// Callers with neither resolve to the sentinel identity and are not
/// subject to duplicate-vote prevention.
pub struct VoterIdentity(pub String);

impl<S> FromRequestParts<S> for VoterIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let identity = forwarded.or_else(|| {
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0.ip().to_string())
        });

        Ok(Self(
            identity.unwrap_or_else(|| UNKNOWN_VOTER.to_string()),
        ))
    }
}

/// GET /api/names - List all name suggestions.
pub async fn list_names(State(state): State<AppState>) -> Json<Vec<NameSuggestion>> {
    Json(state.repo.list_names().await)
}

/// POST /api/names - Suggest a new name.
pub async fn create_name(
    State(state): State<AppState>,
    Json(request): Json<CreateNameRequest>,
) -> CreatedResult<NameSuggestion> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if request.name.trim().chars().count() > MAX_NAME_LEN {
        return Err(AppError::Validation(format!(
            "Name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }

    let suggestion = state.repo.create_name(&request).await?;
    created(suggestion)
}

/// POST /api/vote - Cast, change, or withdraw a vote on a name.
pub async fn vote(
    State(state): State<AppState>,
    VoterIdentity(voter): VoterIdentity,
    Json(request): Json<VoteRequest>,
) -> ApiResult<NameSuggestion> {
    let record = state
        .repo
        .apply_vote(&request.id, &voter, request.vote_type)
        .await?;
    Ok(Json(record))
}

/// DELETE /api/names/:id - Delete a name suggestion.
pub async fn delete_name(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Ack> {
    auth::require_pin(&state.config, &headers)?;
    state.repo.delete_name(&id).await?;
    Ok(ack())
}
