//! AWS-oriented adapters and handlers for the entity CRUD API.
//!
//! This crate owns runtime integration details: the storage and notifier
//! adapter seams with their DynamoDB/SNS implementations, the entity
//! operations layer, and the Lambda handlers. Deterministic contract,
//! key, and error primitives live in `entity_api_core`.

pub mod adapters;
pub mod handlers;
pub mod operations;

#[cfg(test)]
pub(crate) mod testing;
