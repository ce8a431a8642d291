//! Betting pool model.

use serde::{Deserialize, Serialize};

/// A guess at the birth attributes. Immutable after creation except deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    pub id: String,
    pub name: String,
    pub date: String,
    pub time: Option<String>,
    /// Weight guess in grams
    pub weight: i64,
    /// Length guess in centimeters
    pub size: i64,
    pub submitted_at: String,
}

/// Request body for placing a bet.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBetRequest {
    pub name: String,
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    pub weight: i64,
    pub size: i64,
}
