use serde_json::Value;

use entity_api_core::contract::{Entity, EntityUpdates};
use entity_api_core::error::ApiError;

use crate::adapters::notifier::ChangeNotifier;
use crate::adapters::store::RecordStore;
use crate::handlers::{
    error_response, normalize_apigw_body, path_parameter, success_response, ApiGatewayResponse,
};
use crate::operations;

pub fn handle_update_event(
    event: Value,
    store: &dyn RecordStore,
    notifier: &dyn ChangeNotifier,
) -> ApiGatewayResponse {
    match update_from_event(event, store, notifier) {
        Ok(entity) => success_response(200, entity),
        Err(error) => error_response(&error),
    }
}

fn update_from_event(
    event: Value,
    store: &dyn RecordStore,
    notifier: &dyn ChangeNotifier,
) -> Result<Entity, ApiError> {
    let entity_id = path_parameter(&event, "entityId")?;
    let body = normalize_apigw_body(&event)?;
    let updates = serde_json::from_value::<EntityUpdates>(body)
        .map_err(|error| ApiError::Decode(format!("malformed request body: {error}")))?;

    let entity = operations::update_entity(store, &entity_id, &updates)?;

    // The update has committed; notification is best effort and never
    // turns a committed mutation into a failed response.
    if let Err(error) = notifier.publish_entity_changed(&entity, &updates) {
        tracing::warn!(entity_id = %entity.id, error = %error, "change notification failed");
    }

    Ok(entity)
}
