//! Domain types for the radio directory.
//!
//! These are the client-facing shapes produced by the aggregation service.
//! `CountryCode` enforces its invariant at construction time, so code that
//! receives one can trust its validity.

mod country;
mod error;
mod station;

pub use country::{Country, CountryCode, DEFAULT_FLAG, InvalidCountryCode};
pub use error::RecordShapeError;
pub use station::RadioStation;
