//! Shared entity API domain primitives.
//!
//! This crate owns the entity contract types, the composite-key and
//! pagination-cursor codec, the error taxonomy, and process configuration.
//! It intentionally excludes AWS SDK and Lambda runtime concerns; those
//! live in `crates/entity_api_lambda`.

pub mod config;
pub mod contract;
pub mod error;
pub mod keys;
