//! Sans-IO request handlers.
//!
//! Each handler takes the raw API Gateway event plus the adapter seams it
//! needs and returns an [`ApiGatewayResponse`]; the `src/bin/` entry
//! points wire in the AWS-backed implementations.

pub mod authorizer;
pub mod create;
pub mod delete;
pub mod event_action;
pub mod list;
pub mod read;
pub mod update;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use entity_api_core::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

/// Extracts the JSON body from an API Gateway proxy event. The body may
/// arrive as a JSON string or as an already-parsed object.
pub fn normalize_apigw_body(event: &Value) -> Result<Value, ApiError> {
    let Some(object) = event.as_object() else {
        return Err(ApiError::Decode(
            "request payload must be a JSON object".to_string(),
        ));
    };

    let Some(body) = object.get("body") else {
        return Ok(event.clone());
    };

    match body {
        Value::Null => Ok(json!({})),
        Value::Object(_) => Ok(body.clone()),
        Value::String(text) => serde_json::from_str(text)
            .map_err(|error| ApiError::Decode(format!("malformed JSON body: {error}"))),
        _ => Err(ApiError::Decode(
            "request body must be a JSON object".to_string(),
        )),
    }
}

pub fn path_parameter(event: &Value, name: &str) -> Result<String, ApiError> {
    event
        .get("pathParameters")
        .and_then(|parameters| parameters.get(name))
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::Validation(format!("missing path parameter '{name}'")))
}

pub fn query_parameter(event: &Value, name: &str) -> Option<String> {
    event
        .get("queryStringParameters")
        .and_then(|parameters| parameters.get(name))
        .and_then(Value::as_str)
        .map(str::to_string)
}

pub fn success_response(status_code: u16, payload: impl Serialize) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({"Content-Type": "application/json"}),
        body: serde_json::to_string(&payload).expect("response payload should serialize"),
    }
}

pub fn empty_response(status_code: u16) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({"Content-Type": "application/json"}),
        body: String::new(),
    }
}

pub fn error_response(error: &ApiError) -> ApiGatewayResponse {
    if matches!(error, ApiError::Store(_) | ApiError::Publish(_)) {
        tracing::error!(error = %error, "request failed");
    }

    ApiGatewayResponse {
        status_code: error.status_code(),
        headers: json!({"Content-Type": "application/json"}),
        body: json!({"message": error.public_message()}).to_string(),
    }
}
