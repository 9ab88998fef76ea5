use serde_json::Value;

use entity_api_core::contract::Entity;
use entity_api_core::error::ApiError;

use crate::adapters::store::RecordStore;
use crate::handlers::{error_response, path_parameter, success_response, ApiGatewayResponse};
use crate::operations;

pub fn handle_read_event(event: Value, store: &dyn RecordStore) -> ApiGatewayResponse {
    match read_from_event(event, store) {
        Ok(entity) => success_response(200, entity),
        Err(error) => error_response(&error),
    }
}

fn read_from_event(event: Value, store: &dyn RecordStore) -> Result<Entity, ApiError> {
    let entity_id = path_parameter(&event, "entityId")?;
    operations::read_entity(store, &entity_id)
}
