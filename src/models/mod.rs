//! Data models for the Bump baby dashboard.
//!
//! These models match the frontend TypeScript interfaces exactly for seamless interoperability.

mod bet;
mod name;
mod offer;
mod wishlist;

pub use bet::*;
pub use name::*;
pub use offer::*;
pub use wishlist::*;
