//! Wishlist API endpoints.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use url::Url;

use super::{ack, created, Ack, ApiResult, CreatedResult};
use crate::auth;
use crate::errors::AppError;
use crate::models::{CreateWishlistRequest, ReserveRequest, WishlistItem};
use crate::AppState;

/// Maximum length of a wishlist item name.
pub const MAX_ITEM_NAME_LEN: usize = 200;
/// Maximum length of the free-text price field.
pub const MAX_PRICE_LEN: usize = 50;
/// Maximum length of the note field.
pub const MAX_NOTE_LEN: usize = 500;

/// GET /api/wishlist - List all wishlist items.
pub async fn list_wishlist(State(state): State<AppState>) -> Json<Vec<WishlistItem>> {
    Json(state.repo.list_wishlist().await)
}

/// POST /api/wishlist - Add a wishlist item (admin only).
pub async fn create_wishlist_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateWishlistRequest>,
) -> CreatedResult<WishlistItem> {
    auth::require_pin(&state.config, &headers)?;

    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if request.name.trim().chars().count() > MAX_ITEM_NAME_LEN {
        return Err(AppError::Validation(format!(
            "Name must be at most {} characters",
            MAX_ITEM_NAME_LEN
        )));
    }
    validate_link(&request.link)?;
    if let Some(price) = &request.price {
        if price.chars().count() > MAX_PRICE_LEN {
            return Err(AppError::Validation(format!(
                "Price must be at most {} characters",
                MAX_PRICE_LEN
            )));
        }
    }
    if let Some(note) = &request.note {
        if note.chars().count() > MAX_NOTE_LEN {
            return Err(AppError::Validation(format!(
                "Note must be at most {} characters",
                MAX_NOTE_LEN
            )));
        }
    }

    let item = state.repo.create_wishlist_item(&request).await?;
    created(item)
}

/// POST /api/wishlist/reserve - Toggle an item's reservation.
pub async fn reserve_wishlist_item(
    State(state): State<AppState>,
    Json(request): Json<ReserveRequest>,
) -> ApiResult<WishlistItem> {
    let item = state
        .repo
        .toggle_reservation(&request.id, request.reserved_by.as_deref())
        .await?;
    Ok(Json(item))
}

/// DELETE /api/wishlist/:id - Delete a wishlist item.
pub async fn delete_wishlist_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Ack> {
    auth::require_pin(&state.config, &headers)?;
    state.repo.delete_wishlist_item(&id).await?;
    Ok(ack())
}

/// Require a parseable http/https link.
fn validate_link(link: &str) -> Result<(), AppError> {
    if link.trim().is_empty() {
        return Err(AppError::Validation("Link is required".to_string()));
    }

    let parsed = Url::parse(link.trim())
        .map_err(|e| AppError::Validation(format!("Invalid link: {}", e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(AppError::Validation(format!(
            "Link scheme {:?} is not allowed",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_link_accepts_web_urls() {
        assert!(validate_link("https://example.com/crib").is_ok());
        assert!(validate_link("http://example.com").is_ok());
    }

    #[test]
    fn test_validate_link_rejects_other_schemes() {
        assert!(validate_link("javascript:alert(1)").is_err());
        assert!(validate_link("file:///etc/passwd").is_err());
        assert!(validate_link("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_link_rejects_malformed() {
        assert!(validate_link("not a url").is_err());
        assert!(validate_link("").is_err());
    }
}
