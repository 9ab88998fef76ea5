use serde_json::Value;

use entity_api_core::contract::EntityChangedEvent;

/// Downstream reaction to an entity change. Intentionally a no-op today.
fn apply_entity_change(_change: &EntityChangedEvent) {}

/// Consumes an SNS event batch and returns how many records were handled.
///
/// Messages are at-least-once and unordered; a record that fails to
/// decode is logged and skipped rather than failing the whole batch.
pub fn handle_sns_event(event: Value) -> usize {
    let Some(records) = event.get("Records").and_then(Value::as_array) else {
        tracing::error!("event carried no Records array");
        return 0;
    };

    let mut handled = 0;
    for record in records {
        let Some(message) = record
            .get("Sns")
            .and_then(|sns| sns.get("Message"))
            .and_then(Value::as_str)
        else {
            tracing::error!("record carried no Sns.Message");
            continue;
        };

        match serde_json::from_str::<EntityChangedEvent>(message) {
            Ok(change) => {
                apply_entity_change(&change);
                handled += 1;
            }
            Err(error) => {
                tracing::error!(error = %error, "failed to decode entity change message");
            }
        }
    }

    handled
}
