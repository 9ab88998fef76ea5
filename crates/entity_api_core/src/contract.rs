use serde::{Deserialize, Serialize};

use crate::keys::{CompositeKey, ENTITY_SORT_KEY};

/// Message attribute value tagging change notifications.
pub const ENTITY_UPDATED_OPERATION: &str = "entityUpdated";

/// Externally visible entity shape.
///
/// `id` is server-generated and immutable; on every read it is
/// reconstructed from the stored record's own key, never taken from
/// embedded row fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entity {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Sparse update payload. A field left unset means "no change".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityUpdates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EntityUpdates {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    #[serde(rename = "nextToken", default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityList {
    pub entities: Vec<Entity>,
    pub pagination: Pagination,
}

/// Stored row shape for the single-table design.
///
/// Key attributes are never surfaced in API responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityRecord {
    #[serde(rename = "partitionKey")]
    pub partition_key: String,
    #[serde(rename = "sortKey")]
    pub sort_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "createdTime")]
    pub created_time: String,
    #[serde(rename = "updatedTime")]
    pub updated_time: String,
}

impl EntityRecord {
    /// Composite primary key of this record.
    pub fn key(&self) -> CompositeKey {
        CompositeKey {
            partition_key: self.partition_key.clone(),
            sort_key: self.sort_key.clone(),
        }
    }

    /// Reconstructs the external entity from the record's own key.
    ///
    /// Only rows carrying the entity sort tag map back to an entity; the
    /// identity comes from the key, not from embedded fields.
    pub fn to_entity(&self) -> Entity {
        debug_assert_eq!(self.sort_key, ENTITY_SORT_KEY);
        Entity {
            id: self.partition_key.clone(),
            name: self.name.clone(),
        }
    }
}

/// Payload published on the change topic and consumed by the event
/// handler.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityChangedEvent {
    pub entity: Entity,
    pub updates: EntityUpdates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_serialization_omits_absent_name() {
        let entity = Entity {
            id: "abc".to_string(),
            name: None,
        };
        let json = serde_json::to_string(&entity).expect("entity should serialize");
        assert_eq!(json, "{\"id\":\"abc\"}");
    }

    #[test]
    fn updates_with_no_fields_are_empty() {
        assert!(EntityUpdates::default().is_empty());
        assert!(!EntityUpdates {
            name: Some("Alice".to_string()),
        }
        .is_empty());
    }

    #[test]
    fn record_reconstructs_entity_from_its_key() {
        let record = EntityRecord {
            partition_key: "abc-123".to_string(),
            sort_key: ENTITY_SORT_KEY.to_string(),
            name: Some("Alice".to_string()),
            created_time: "2026-08-24T00:00:00+00:00".to_string(),
            updated_time: "2026-08-24T00:00:00+00:00".to_string(),
        };

        let entity = record.to_entity();
        assert_eq!(entity.id, "abc-123");
        assert_eq!(entity.name.as_deref(), Some("Alice"));
    }

    #[test]
    fn record_uses_store_attribute_names_on_the_wire() {
        let record = EntityRecord {
            partition_key: "abc".to_string(),
            sort_key: ENTITY_SORT_KEY.to_string(),
            name: None,
            created_time: "2026-08-24T00:00:00+00:00".to_string(),
            updated_time: "2026-08-24T00:00:00+00:00".to_string(),
        };

        let json = serde_json::to_value(&record).expect("record should serialize");
        assert!(json.get("partitionKey").is_some());
        assert!(json.get("sortKey").is_some());
        assert!(json.get("createdTime").is_some());
        assert!(json.get("updatedTime").is_some());
    }
}
