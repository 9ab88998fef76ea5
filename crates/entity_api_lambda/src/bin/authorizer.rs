use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

use entity_api_lambda::handlers::authorizer::handle_authorizer_event;

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::tracing::init_default_subscriber();

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| async move {
        handle_authorizer_event(event.payload).map_err(|error| Error::from(error.to_string()))
    }))
    .await
}
