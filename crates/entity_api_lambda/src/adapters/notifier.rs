use aws_sdk_sns::types::MessageAttributeValue;

use entity_api_core::contract::{Entity, EntityChangedEvent, EntityUpdates, ENTITY_UPDATED_OPERATION};
use entity_api_core::error::ApiError;

use crate::adapters::block_on;

/// Publishes entity-changed events to a pub/sub topic.
///
/// Fire-and-forget: implementations never retry and the triggering
/// mutation has already committed before publish is attempted.
pub trait ChangeNotifier {
    fn publish_entity_changed(
        &self,
        entity: &Entity,
        updates: &EntityUpdates,
    ) -> Result<(), ApiError>;
}

/// [`ChangeNotifier`] backed by one well-known SNS topic.
#[derive(Debug, Clone)]
pub struct SnsChangeNotifier {
    client: aws_sdk_sns::Client,
    topic_arn: String,
}

impl SnsChangeNotifier {
    pub fn new(client: aws_sdk_sns::Client, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }
}

impl ChangeNotifier for SnsChangeNotifier {
    fn publish_entity_changed(
        &self,
        entity: &Entity,
        updates: &EntityUpdates,
    ) -> Result<(), ApiError> {
        let event = EntityChangedEvent {
            entity: entity.clone(),
            updates: updates.clone(),
        };
        let message = serde_json::to_string(&event)
            .map_err(|error| ApiError::Publish(format!("failed to serialize change event: {error}")))?;
        let operation = MessageAttributeValue::builder()
            .data_type("String")
            .string_value(ENTITY_UPDATED_OPERATION)
            .build()
            .map_err(|error| ApiError::Publish(format!("failed to build message attribute: {error}")))?;

        let client = self.client.clone();
        let topic_arn = self.topic_arn.clone();

        block_on(async move {
            client
                .publish()
                .topic_arn(topic_arn)
                .message(message)
                .message_attributes("operation", operation)
                .send()
                .await
                .map(|_| ())
                .map_err(|error| ApiError::Publish(format!("failed to publish change event: {error}")))
        })
    }
}
