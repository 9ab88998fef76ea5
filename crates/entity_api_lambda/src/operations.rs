//! Entity-level operations composed from the storage adapter primitives.
//!
//! Handlers call these with whichever [`RecordStore`] the binary wired
//! up; tests inject in-memory doubles.

use chrono::Utc;
use uuid::Uuid;

use entity_api_core::contract::{Entity, EntityList, EntityRecord, EntityUpdates, Pagination};
use entity_api_core::error::ApiError;
use entity_api_core::keys::{decode_cursor, encode_cursor, entity_key, ENTITY_SORT_KEY};

use crate::adapters::store::{RecordPatch, RecordStore};

/// Patchable field names, matching the stored attribute names.
pub const NAME_FIELD: &str = "name";
pub const UPDATED_TIME_FIELD: &str = "updatedTime";

/// Creates a new entity under a freshly generated 128-bit random id.
///
/// Collisions are treated as negligible, not defended against; if the
/// store still reports one, the conflict is surfaced, never swallowed.
pub fn create_entity(store: &dyn RecordStore, name: Option<String>) -> Result<Entity, ApiError> {
    create_entity_with_id(store, &Uuid::new_v4().to_string(), name)
}

pub fn create_entity_with_id(
    store: &dyn RecordStore,
    entity_id: &str,
    name: Option<String>,
) -> Result<Entity, ApiError> {
    let now = Utc::now().to_rfc3339();
    let record = EntityRecord {
        partition_key: entity_id.to_string(),
        sort_key: ENTITY_SORT_KEY.to_string(),
        name,
        created_time: now.clone(),
        updated_time: now,
    };

    store.put(&record, true)?;
    Ok(record.to_entity())
}

pub fn read_entity(store: &dyn RecordStore, entity_id: &str) -> Result<Entity, ApiError> {
    let record = store
        .get(&entity_key(entity_id))?
        .ok_or(ApiError::NotFound)?;
    Ok(record.to_entity())
}

/// Applies a sparse patch and returns the post-update entity.
///
/// An update carrying no fields is rejected outright and never reaches
/// the store.
pub fn update_entity(
    store: &dyn RecordStore,
    entity_id: &str,
    updates: &EntityUpdates,
) -> Result<Entity, ApiError> {
    let mut patch = RecordPatch::default();
    if let Some(name) = &updates.name {
        patch.set(NAME_FIELD, name.clone());
    }

    if patch.is_empty() {
        return Err(ApiError::Validation(
            "update requires at least one field".to_string(),
        ));
    }

    patch.set(UPDATED_TIME_FIELD, Utc::now().to_rfc3339());

    let record = store.update(&entity_key(entity_id), &patch)?;
    Ok(record.to_entity())
}

/// Deletes the entity's own record. Idempotent; no cascade into related
/// item kinds (none exist in the current schema).
pub fn delete_entity(store: &dyn RecordStore, entity_id: &str) -> Result<(), ApiError> {
    store.delete(&entity_key(entity_id))
}

/// Pages through one partition, `max_limit` items at a time at most.
///
/// `cursor` is the opaque token from a previous page; empty means start
/// from the beginning. The returned token is absent once the partition
/// is exhausted.
pub fn list_entities(
    store: &dyn RecordStore,
    partition_key: &str,
    limit: i32,
    cursor: &str,
    max_limit: i32,
) -> Result<EntityList, ApiError> {
    let start_key = decode_cursor(cursor)?;
    let capped_limit = limit.clamp(1, max_limit);

    let page = store.query(partition_key, capped_limit, start_key.as_ref())?;

    let entities = page.records.iter().map(EntityRecord::to_entity).collect();
    let next_token = page.last_key.as_ref().map(encode_cursor);

    Ok(EntityList {
        entities,
        pagination: Pagination { next_token },
    })
}
