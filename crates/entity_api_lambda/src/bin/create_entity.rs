use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

use entity_api_core::config::Config;
use entity_api_lambda::adapters::dynamo::DynamoRecordStore;
use entity_api_lambda::handlers::create::handle_create_event;
use entity_api_lambda::handlers::ApiGatewayResponse;

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::tracing::init_default_subscriber();

    let config = Config::from_env();
    if config.table_name.is_empty() {
        return Err(Error::from("PRIMARY_TABLE_NAME must be configured"));
    }

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = DynamoRecordStore::new(
        aws_sdk_dynamodb::Client::new(&aws_config),
        config.table_name.clone(),
    );
    let store = &store;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        Ok::<ApiGatewayResponse, Error>(handle_create_event(event.payload, store))
    }))
    .await
}
