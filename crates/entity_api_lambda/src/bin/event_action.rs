use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

use entity_api_lambda::handlers::event_action::handle_sns_event;

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::tracing::init_default_subscriber();

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| async move {
        let handled = handle_sns_event(event.payload);
        tracing::info!(handled, "entity change records handled");
        Ok::<(), Error>(())
    }))
    .await
}
