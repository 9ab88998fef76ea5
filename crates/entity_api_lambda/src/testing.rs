//! In-memory test doubles for the adapter seams.

use std::collections::BTreeMap;
use std::sync::Mutex;

use entity_api_core::contract::{Entity, EntityChangedEvent, EntityRecord, EntityUpdates};
use entity_api_core::error::ApiError;
use entity_api_core::keys::{CompositeKey, ENTITY_SORT_KEY};

use crate::adapters::notifier::ChangeNotifier;
use crate::adapters::store::{QueryPage, RecordPatch, RecordStore};
use crate::operations::{NAME_FIELD, UPDATED_TIME_FIELD};

/// [`RecordStore`] over an ordered in-memory table, recording the
/// operations it served so tests can assert on store traffic.
#[derive(Default)]
pub struct MemoryRecordStore {
    rows: Mutex<BTreeMap<(String, String), EntityRecord>>,
    calls: Mutex<Vec<String>>,
}

impl MemoryRecordStore {
    pub fn record(&self, entity_id: &str) -> Option<EntityRecord> {
        self.rows
            .lock()
            .expect("poisoned mutex")
            .get(&(entity_id.to_string(), ENTITY_SORT_KEY.to_string()))
            .cloned()
    }

    pub fn seed_partition_item(&self, partition_key: &str, sort_key: &str, name: &str) {
        let record = EntityRecord {
            partition_key: partition_key.to_string(),
            sort_key: sort_key.to_string(),
            name: Some(name.to_string()),
            created_time: "2026-08-24T00:00:00+00:00".to_string(),
            updated_time: "2026-08-24T00:00:00+00:00".to_string(),
        };
        self.rows
            .lock()
            .expect("poisoned mutex")
            .insert((partition_key.to_string(), sort_key.to_string()), record);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("poisoned mutex").clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().expect("poisoned mutex").clear();
    }

    fn log(&self, call: String) {
        self.calls.lock().expect("poisoned mutex").push(call);
    }
}

impl RecordStore for MemoryRecordStore {
    fn put(&self, record: &EntityRecord, unique_guard: bool) -> Result<(), ApiError> {
        self.log(format!("put:{}", record.partition_key));
        let mut rows = self.rows.lock().expect("poisoned mutex");
        let row_key = (record.partition_key.clone(), record.sort_key.clone());
        if unique_guard && rows.contains_key(&row_key) {
            return Err(ApiError::Conflict);
        }
        rows.insert(row_key, record.clone());
        Ok(())
    }

    fn get(&self, key: &CompositeKey) -> Result<Option<EntityRecord>, ApiError> {
        self.log(format!("get:{}", key.partition_key));
        Ok(self
            .rows
            .lock()
            .expect("poisoned mutex")
            .get(&(key.partition_key.clone(), key.sort_key.clone()))
            .cloned())
    }

    fn query(
        &self,
        partition_key: &str,
        limit: i32,
        start_key: Option<&CompositeKey>,
    ) -> Result<QueryPage, ApiError> {
        self.log(format!("query:{limit}"));
        let rows = self.rows.lock().expect("poisoned mutex");
        let matching: Vec<EntityRecord> = rows
            .values()
            .filter(|record| record.partition_key == partition_key)
            .filter(|record| match start_key {
                Some(key) => record.sort_key > key.sort_key,
                None => true,
            })
            .cloned()
            .collect();

        let page: Vec<EntityRecord> = matching.iter().take(limit as usize).cloned().collect();
        let last_key = if matching.len() > page.len() {
            page.last().map(EntityRecord::key)
        } else {
            None
        };

        Ok(QueryPage {
            records: page,
            last_key,
        })
    }

    fn update(&self, key: &CompositeKey, patch: &RecordPatch) -> Result<EntityRecord, ApiError> {
        self.log(format!("update:{}", key.partition_key));
        let mut rows = self.rows.lock().expect("poisoned mutex");
        let row = rows
            .get_mut(&(key.partition_key.clone(), key.sort_key.clone()))
            .ok_or(ApiError::NotFound)?;

        for (field, value) in &patch.fields {
            match field.as_str() {
                NAME_FIELD => row.name = Some(value.clone()),
                UPDATED_TIME_FIELD => row.updated_time = value.clone(),
                other => {
                    return Err(ApiError::Store(format!(
                        "unsupported patch field '{other}'"
                    )))
                }
            }
        }

        Ok(row.clone())
    }

    fn delete(&self, key: &CompositeKey) -> Result<(), ApiError> {
        self.log(format!("delete:{}", key.partition_key));
        self.rows
            .lock()
            .expect("poisoned mutex")
            .remove(&(key.partition_key.clone(), key.sort_key.clone()));
        Ok(())
    }
}

/// [`ChangeNotifier`] that records published events, optionally failing
/// every publish.
#[derive(Default)]
pub struct RecordingNotifier {
    published: Mutex<Vec<EntityChangedEvent>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn published(&self) -> Vec<EntityChangedEvent> {
        self.published.lock().expect("poisoned mutex").clone()
    }
}

impl ChangeNotifier for RecordingNotifier {
    fn publish_entity_changed(
        &self,
        entity: &Entity,
        updates: &EntityUpdates,
    ) -> Result<(), ApiError> {
        if self.fail {
            return Err(ApiError::Publish("injected publish failure".to_string()));
        }
        self.published
            .lock()
            .expect("poisoned mutex")
            .push(EntityChangedEvent {
                entity: entity.clone(),
                updates: updates.clone(),
            });
        Ok(())
    }
}
