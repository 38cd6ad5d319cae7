//! Web layer for the radio directory.
//!
//! Exposes the aggregation service as a JSON API under `/api`. Route-level
//! validation (country-code shape, limit clamping) lives here; everything
//! else is delegated to [`crate::service::RadioService`].

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, clamp_limit, create_router};
pub use state::AppState;
