use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Sort-key literal tagging a row as the entity's own record.
///
/// Every partition holds a single item today, but the sort key is reserved
/// so related item kinds can share a partition later without ambiguity.
pub const ENTITY_SORT_KEY: &str = "entity";

/// Composite primary key of a stored record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompositeKey {
    #[serde(rename = "partitionKey")]
    pub partition_key: String,
    #[serde(rename = "sortKey")]
    pub sort_key: String,
}

/// Builds the composite key of an entity's own record.
pub fn entity_key(entity_id: &str) -> CompositeKey {
    CompositeKey {
        partition_key: entity_id.to_string(),
        sort_key: ENTITY_SORT_KEY.to_string(),
    }
}

/// Encodes a resumption cursor from the last key a page returned.
///
/// Uses the URL-safe alphabet so the token can ride in a query parameter
/// without percent-encoding.
pub fn encode_cursor(last_key: &CompositeKey) -> String {
    let json = serde_json::to_string(last_key).expect("composite key should serialize");
    URL_SAFE_NO_PAD.encode(json)
}

/// Decodes a pagination cursor. An empty token is the distinguished
/// "start from the beginning" value, not an error.
pub fn decode_cursor(token: &str) -> Result<Option<CompositeKey>, ApiError> {
    if token.is_empty() {
        return Ok(None);
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|error| ApiError::Decode(format!("invalid cursor encoding: {error}")))?;
    let key = serde_json::from_slice::<CompositeKey>(&bytes)
        .map_err(|error| ApiError::Decode(format!("invalid cursor payload: {error}")))?;

    Ok(Some(key))
}
