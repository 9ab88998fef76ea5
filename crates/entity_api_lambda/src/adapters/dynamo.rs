use std::collections::HashMap;

use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};

use entity_api_core::contract::EntityRecord;
use entity_api_core::error::ApiError;
use entity_api_core::keys::CompositeKey;

use crate::adapters::block_on;
use crate::adapters::store::{QueryPage, RecordPatch, RecordStore};

pub const PARTITION_KEY_ATTR: &str = "partitionKey";
pub const SORT_KEY_ATTR: &str = "sortKey";
const NAME_ATTR: &str = "name";
const CREATED_TIME_ATTR: &str = "createdTime";
const UPDATED_TIME_ATTR: &str = "updatedTime";

/// [`RecordStore`] backed by one DynamoDB table.
///
/// The client is built once per process and reused; each call issues a
/// single store operation.
#[derive(Debug, Clone)]
pub struct DynamoRecordStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoRecordStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

impl RecordStore for DynamoRecordStore {
    fn put(&self, record: &EntityRecord, unique_guard: bool) -> Result<(), ApiError> {
        let client = self.client.clone();
        let table_name = self.table_name.clone();
        let item = record_to_item(record);

        block_on(async move {
            let mut request = client.put_item().table_name(table_name).set_item(Some(item));
            if unique_guard {
                request =
                    request.condition_expression(format!("attribute_not_exists({SORT_KEY_ATTR})"));
            }

            match request.send().await {
                Ok(_) => Ok(()),
                Err(error) => {
                    let conditional_failure = error
                        .as_service_error()
                        .map(|service_error| service_error.is_conditional_check_failed_exception())
                        .unwrap_or(false);
                    if conditional_failure {
                        Err(ApiError::Conflict)
                    } else {
                        Err(ApiError::Store(format!("put_item failed: {error}")))
                    }
                }
            }
        })
    }

    fn get(&self, key: &CompositeKey) -> Result<Option<EntityRecord>, ApiError> {
        let client = self.client.clone();
        let table_name = self.table_name.clone();
        let key_item = key_to_item(key);

        block_on(async move {
            let output = client
                .get_item()
                .table_name(table_name)
                .set_key(Some(key_item))
                .send()
                .await
                .map_err(|error| ApiError::Store(format!("get_item failed: {error}")))?;

            match output.item() {
                Some(item) => Ok(Some(item_to_record(item)?)),
                None => Ok(None),
            }
        })
    }

    fn query(
        &self,
        partition_key: &str,
        limit: i32,
        start_key: Option<&CompositeKey>,
    ) -> Result<QueryPage, ApiError> {
        let client = self.client.clone();
        let table_name = self.table_name.clone();
        let partition_value = AttributeValue::S(partition_key.to_string());
        let start_item = start_key.map(key_to_item);

        block_on(async move {
            let mut request = client
                .query()
                .table_name(table_name)
                .key_condition_expression(format!("{PARTITION_KEY_ATTR} = :partitionKey"))
                .expression_attribute_values(":partitionKey", partition_value)
                .limit(limit);
            if let Some(item) = start_item {
                request = request.set_exclusive_start_key(Some(item));
            }

            let output = request
                .send()
                .await
                .map_err(|error| ApiError::Store(format!("query failed: {error}")))?;

            let mut records = Vec::with_capacity(output.items().len());
            for item in output.items() {
                records.push(item_to_record(item)?);
            }

            let last_key = match output.last_evaluated_key() {
                Some(item) => Some(item_to_key(item)?),
                None => None,
            };

            Ok(QueryPage { records, last_key })
        })
    }

    fn update(&self, key: &CompositeKey, patch: &RecordPatch) -> Result<EntityRecord, ApiError> {
        let client = self.client.clone();
        let table_name = self.table_name.clone();
        let key_item = key_to_item(key);

        // Alias every patched field; attribute names like `name` collide
        // with DynamoDB reserved words otherwise.
        let mut names = HashMap::new();
        let mut values = HashMap::new();
        let mut clauses = Vec::with_capacity(patch.fields.len());
        for (index, (field, value)) in patch.fields.iter().enumerate() {
            let name_alias = format!("#f{index}");
            let value_alias = format!(":v{index}");
            clauses.push(format!("{name_alias} = {value_alias}"));
            names.insert(name_alias, field.clone());
            values.insert(value_alias, AttributeValue::S(value.clone()));
        }
        let update_expression = format!("SET {}", clauses.join(", "));

        block_on(async move {
            let result = client
                .update_item()
                .table_name(table_name)
                .set_key(Some(key_item))
                .update_expression(update_expression)
                .set_expression_attribute_names(Some(names))
                .set_expression_attribute_values(Some(values))
                .condition_expression(format!("attribute_exists({PARTITION_KEY_ATTR})"))
                .return_values(ReturnValue::AllNew)
                .send()
                .await;

            let output = match result {
                Ok(output) => output,
                Err(error) => {
                    let conditional_failure = error
                        .as_service_error()
                        .map(|service_error| service_error.is_conditional_check_failed_exception())
                        .unwrap_or(false);
                    return if conditional_failure {
                        Err(ApiError::NotFound)
                    } else {
                        Err(ApiError::Store(format!("update_item failed: {error}")))
                    };
                }
            };

            let attributes = output
                .attributes()
                .ok_or_else(|| ApiError::Store("update_item returned no attributes".to_string()))?;
            item_to_record(attributes)
        })
    }

    fn delete(&self, key: &CompositeKey) -> Result<(), ApiError> {
        let client = self.client.clone();
        let table_name = self.table_name.clone();
        let key_item = key_to_item(key);

        block_on(async move {
            client
                .delete_item()
                .table_name(table_name)
                .set_key(Some(key_item))
                .send()
                .await
                .map(|_| ())
                .map_err(|error| ApiError::Store(format!("delete_item failed: {error}")))
        })
    }
}

fn record_to_item(record: &EntityRecord) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert(
        PARTITION_KEY_ATTR.to_string(),
        AttributeValue::S(record.partition_key.clone()),
    );
    item.insert(
        SORT_KEY_ATTR.to_string(),
        AttributeValue::S(record.sort_key.clone()),
    );
    item.insert(
        CREATED_TIME_ATTR.to_string(),
        AttributeValue::S(record.created_time.clone()),
    );
    item.insert(
        UPDATED_TIME_ATTR.to_string(),
        AttributeValue::S(record.updated_time.clone()),
    );
    if let Some(name) = &record.name {
        item.insert(NAME_ATTR.to_string(), AttributeValue::S(name.clone()));
    }
    item
}

fn item_to_record(item: &HashMap<String, AttributeValue>) -> Result<EntityRecord, ApiError> {
    Ok(EntityRecord {
        partition_key: string_attr(item, PARTITION_KEY_ATTR)?,
        sort_key: string_attr(item, SORT_KEY_ATTR)?,
        name: optional_string_attr(item, NAME_ATTR),
        created_time: string_attr(item, CREATED_TIME_ATTR)?,
        updated_time: string_attr(item, UPDATED_TIME_ATTR)?,
    })
}

fn key_to_item(key: &CompositeKey) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            PARTITION_KEY_ATTR.to_string(),
            AttributeValue::S(key.partition_key.clone()),
        ),
        (
            SORT_KEY_ATTR.to_string(),
            AttributeValue::S(key.sort_key.clone()),
        ),
    ])
}

fn item_to_key(item: &HashMap<String, AttributeValue>) -> Result<CompositeKey, ApiError> {
    Ok(CompositeKey {
        partition_key: string_attr(item, PARTITION_KEY_ATTR)?,
        sort_key: string_attr(item, SORT_KEY_ATTR)?,
    })
}

fn string_attr(item: &HashMap<String, AttributeValue>, name: &str) -> Result<String, ApiError> {
    item.get(name)
        .and_then(|value| value.as_s().ok())
        .cloned()
        .ok_or_else(|| ApiError::Store(format!("record is missing string attribute '{name}'")))
}

fn optional_string_attr(item: &HashMap<String, AttributeValue>, name: &str) -> Option<String> {
    item.get(name).and_then(|value| value.as_s().ok()).cloned()
}
