use serde_json::Value;

use entity_api_core::error::ApiError;

use crate::adapters::store::RecordStore;
use crate::handlers::{empty_response, error_response, path_parameter, ApiGatewayResponse};
use crate::operations;

pub fn handle_delete_event(event: Value, store: &dyn RecordStore) -> ApiGatewayResponse {
    match delete_from_event(event, store) {
        Ok(()) => empty_response(204),
        Err(error) => error_response(&error),
    }
}

fn delete_from_event(event: Value, store: &dyn RecordStore) -> Result<(), ApiError> {
    let entity_id = path_parameter(&event, "entityId")?;
    operations::delete_entity(store, &entity_id)
}
