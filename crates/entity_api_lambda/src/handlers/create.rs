use serde::Deserialize;
use serde_json::Value;

use entity_api_core::contract::Entity;
use entity_api_core::error::ApiError;

use crate::adapters::store::RecordStore;
use crate::handlers::{error_response, normalize_apigw_body, success_response, ApiGatewayResponse};
use crate::operations;

#[derive(Debug, Deserialize)]
struct CreateBody {
    #[serde(default)]
    name: Option<String>,
}

pub fn handle_create_event(event: Value, store: &dyn RecordStore) -> ApiGatewayResponse {
    match create_from_event(event, store) {
        Ok(entity) => success_response(201, entity),
        Err(error) => error_response(&error),
    }
}

fn create_from_event(event: Value, store: &dyn RecordStore) -> Result<Entity, ApiError> {
    let body = normalize_apigw_body(&event)?;
    let payload = serde_json::from_value::<CreateBody>(body)
        .map_err(|error| ApiError::Decode(format!("malformed request body: {error}")))?;

    operations::create_entity(store, payload.name)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::MemoryRecordStore;

    #[test]
    fn creates_entity_from_string_body() {
        let store = MemoryRecordStore::default();
        let response = handle_create_event(json!({"body": "{\"name\":\"Alice\"}"}), &store);

        assert_eq!(response.status_code, 201);
        let entity: Entity = serde_json::from_str(&response.body).expect("body should parse");
        assert!(!entity.id.is_empty());
        assert_eq!(entity.name.as_deref(), Some("Alice"));
        assert!(store.record(&entity.id).is_some());
    }

    #[test]
    fn accepts_body_without_name() {
        let store = MemoryRecordStore::default();
        let response = handle_create_event(json!({"body": null}), &store);

        assert_eq!(response.status_code, 201);
        let entity: Entity = serde_json::from_str(&response.body).expect("body should parse");
        assert_eq!(entity.name, None);
    }

    #[test]
    fn rejects_malformed_body_without_writing() {
        let store = MemoryRecordStore::default();
        let response = handle_create_event(json!({"body": "{broken"}), &store);

        assert_eq!(response.status_code, 400);
        assert!(store.calls().is_empty());
    }
}
