use serde_json::Value;

use entity_api_core::contract::EntityList;
use entity_api_core::error::ApiError;

use crate::adapters::store::RecordStore;
use crate::handlers::{
    error_response, path_parameter, query_parameter, success_response, ApiGatewayResponse,
};
use crate::operations;

pub fn handle_list_event(
    event: Value,
    store: &dyn RecordStore,
    max_limit: i32,
) -> ApiGatewayResponse {
    match list_from_event(event, store, max_limit) {
        Ok(list) => success_response(200, list),
        Err(error) => error_response(&error),
    }
}

fn list_from_event(
    event: Value,
    store: &dyn RecordStore,
    max_limit: i32,
) -> Result<EntityList, ApiError> {
    // The path parameter scopes the scan to one partition; today that
    // partition holds only the entity's own record, the route exists for
    // future same-partition item kinds.
    let partition_key = path_parameter(&event, "entityId")?;

    let limit = match query_parameter(&event, "limit") {
        Some(raw) => raw
            .parse::<i32>()
            .map_err(|_| ApiError::Validation("limit must be an integer".to_string()))?,
        None => max_limit,
    };
    let cursor = query_parameter(&event, "nextToken").unwrap_or_default();

    operations::list_entities(store, &partition_key, limit, &cursor, max_limit)
}
