//! REST API module.
//!
//! Contains all API routes and handlers following the frontend contract.

mod bets;
mod meta;
mod names;
mod offers;
mod wishlist;

pub use bets::*;
pub use meta::*;
pub use names::*;
pub use offers::*;
pub use wishlist::*;

use axum::{http::StatusCode, Json};
use serde::Serialize;

use crate::errors::AppError;

/// Response type for handlers that answer with a plain JSON body.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Response type for create handlers (201 with the new record).
pub type CreatedResult<T> = Result<(StatusCode, Json<T>), AppError>;

/// Wrap a freshly created record in a 201 response.
pub fn created<T: Serialize>(record: T) -> CreatedResult<T> {
    Ok((StatusCode::CREATED, Json(record)))
}

/// Body returned by delete and verification endpoints.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

pub fn ack() -> Json<Ack> {
    Json(Ack { success: true })
}
