//! Item-offer API endpoints.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};

use super::{ack, created, Ack, ApiResult, CreatedResult, MAX_NAME_LEN};
use crate::auth;
use crate::errors::AppError;
use crate::images;
use crate::models::{CreateOfferRequest, Offer, PublicOffer};
use crate::AppState;

/// Maximum length of an offer description.
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// GET /api/offers - List all offers.
///
/// With a valid admin PIN the full records are returned; everyone else
/// gets the public view without the email key.
pub async fn list_offers(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let offers = state.repo.list_offers().await;

    if auth::authorize(&state.config, &headers) {
        Json(offers).into_response()
    } else {
        let public: Vec<PublicOffer> = offers.iter().map(PublicOffer::from).collect();
        Json(public).into_response()
    }
}

/// POST /api/offers - Post a new offer with its image.
pub async fn create_offer(
    State(state): State<AppState>,
    Json(request): Json<CreateOfferRequest>,
) -> CreatedResult<Offer> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if request.name.trim().chars().count() > MAX_NAME_LEN {
        return Err(AppError::Validation(format!(
            "Name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::Validation("Description is required".to_string()));
    }
    if request.description.trim().chars().count() > MAX_DESCRIPTION_LEN {
        return Err(AppError::Validation(format!(
            "Description must be at most {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }
    if request.image_base64.trim().is_empty() {
        return Err(AppError::Validation("Image is required".to_string()));
    }

    // Ingest before touching the collection: a failed transcode must
    // leave neither a file nor a record behind.
    let id = uuid::Uuid::new_v4().to_string();
    let image_ref =
        images::ingest(&state.config.uploads_dir, &id, &request.image_base64).await?;

    let offer = state.repo.create_offer(id, &request, image_ref).await?;
    created(offer)
}

/// DELETE /api/offers/:id - Delete an offer and its image.
pub async fn delete_offer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Ack> {
    auth::require_pin(&state.config, &headers)?;

    let removed = state.repo.delete_offer(&id).await?;
    images::remove(&state.config.uploads_dir, &removed.image_ref).await;

    Ok(ack())
}
