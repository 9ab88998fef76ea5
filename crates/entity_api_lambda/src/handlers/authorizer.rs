use serde::{Deserialize, Serialize};
use serde_json::Value;

use entity_api_core::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IamPolicyStatement {
    #[serde(rename = "Action")]
    pub action: Vec<String>,
    #[serde(rename = "Effect")]
    pub effect: String,
    #[serde(rename = "Resource")]
    pub resource: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IamPolicyDocument {
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "Statement")]
    pub statement: Vec<IamPolicyStatement>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorizerResponse {
    #[serde(rename = "principalId")]
    pub principal_id: String,
    #[serde(rename = "policyDocument")]
    pub policy_document: IamPolicyDocument,
}

/// Coarse gate: any bearer-shaped Authorization header is allowed, a
/// missing or blank one is denied. No token verification happens here.
pub fn handle_authorizer_event(event: Value) -> Result<AuthorizerResponse, ApiError> {
    let method_arn = event
        .get("methodArn")
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::Validation("missing method ARN".to_string()))?;

    // Widen the policy to the whole stage; a single-method policy would
    // deny every other route in the API for the cached authorization.
    let mut pieces = method_arn.splitn(3, '/');
    let (Some(api_gateway_arn), Some(stage)) = (pieces.next(), pieces.next()) else {
        return Err(ApiError::Validation(format!(
            "could not parse method ARN '{method_arn}'"
        )));
    };
    let api_stage_arn = format!("{api_gateway_arn}/{stage}/*");

    let effect = match bearer_token(&event) {
        Some(_) => "Allow",
        None => {
            tracing::warn!("authorization header missing or not bearer-shaped");
            "Deny"
        }
    };

    Ok(generate_policy("user", effect, &api_stage_arn))
}

fn bearer_token(event: &Value) -> Option<String> {
    let headers = event.get("headers")?;
    let header = headers
        .get("Authorization")
        .or_else(|| headers.get("authorization"))
        .and_then(Value::as_str)?;

    let mut pieces = header.split(' ');
    match (pieces.next(), pieces.next(), pieces.next()) {
        (Some(_scheme), Some(token), None) if !token.is_empty() => Some(token.to_string()),
        _ => None,
    }
}

fn generate_policy(principal_id: &str, effect: &str, resource: &str) -> AuthorizerResponse {
    AuthorizerResponse {
        principal_id: principal_id.to_string(),
        policy_document: IamPolicyDocument {
            version: "2012-10-17".to_string(),
            statement: vec![IamPolicyStatement {
                action: vec!["execute-api:Invoke".to_string()],
                effect: effect.to_string(),
                resource: vec![resource.to_string()],
            }],
        },
    }
}
