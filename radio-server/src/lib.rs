//! Radio directory aggregation server.
//!
//! A read-through cache in front of the Radio Browser directory: answers
//! "which countries have stations?" and "which stations does this country
//! have?", normalizing noisy upstream records into a stable schema and
//! degrading gracefully when the upstream is unreachable.

pub mod cache;
pub mod config;
pub mod directory;
pub mod domain;
pub mod service;
pub mod transform;
pub mod web;
