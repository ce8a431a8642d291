//! Wishlist item model.

use serde::{Deserialize, Serialize};

/// A gift on the family wishlist.
///
/// `reserved_by` is non-null exactly when `reserved` is true.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: String,
    pub name: String,
    pub link: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub reserved: bool,
    pub reserved_by: Option<String>,
    pub created_at: String,
}

/// Request body for adding a wishlist item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWishlistRequest {
    pub name: String,
    pub link: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Request body for toggling a reservation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveRequest {
    pub id: String,
    #[serde(default)]
    pub reserved_by: Option<String>,
}
