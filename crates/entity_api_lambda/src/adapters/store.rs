use std::collections::BTreeMap;

use entity_api_core::contract::EntityRecord;
use entity_api_core::error::ApiError;
use entity_api_core::keys::CompositeKey;

/// Sparse field assignments applied atomically by [`RecordStore::update`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub fields: BTreeMap<String, String>,
}

impl RecordPatch {
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One page of a range scan within a single partition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPage {
    pub records: Vec<EntityRecord>,
    /// Key of the last record actually returned, present only when the
    /// partition may hold more items. Never a speculative look-ahead key.
    pub last_key: Option<CompositeKey>,
}

/// Generic primitives over the single logical table.
///
/// Implementations do not retry; conditional-write guards are the store's
/// responsibility, not an in-process lock.
pub trait RecordStore {
    /// Writes a record. With `unique_guard` the write is conditioned on
    /// the composite key not existing and fails with
    /// [`ApiError::Conflict`] otherwise; without it the write overwrites.
    fn put(&self, record: &EntityRecord, unique_guard: bool) -> Result<(), ApiError>;

    /// Point lookup. Absence is `None`, not an error; callers decide
    /// whether that is a not-found failure.
    fn get(&self, key: &CompositeKey) -> Result<Option<EntityRecord>, ApiError>;

    /// Range scan within one partition, bounded by `limit` and resuming
    /// after `start_key` when present.
    fn query(
        &self,
        partition_key: &str,
        limit: i32,
        start_key: Option<&CompositeKey>,
    ) -> Result<QueryPage, ApiError>;

    /// Applies a sparse patch in a single atomic store round trip and
    /// returns the post-update record. Conditioned on existence only;
    /// an absent target fails with [`ApiError::NotFound`]. Callers must
    /// not pass an empty patch.
    fn update(&self, key: &CompositeKey, patch: &RecordPatch) -> Result<EntityRecord, ApiError>;

    /// Unconditional delete; deleting an absent key succeeds.
    fn delete(&self, key: &CompositeKey) -> Result<(), ApiError>;
}
