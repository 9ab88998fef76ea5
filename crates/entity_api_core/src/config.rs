use std::env;

/// Hard page ceiling for list queries. DynamoDB batch writes cap at 25
/// items, so reads stay under that with headroom.
pub const MAX_PAGE_LIMIT: i32 = 20;

/// Process-wide configuration.
///
/// Built once at process start in each binary and passed by reference
/// into the components that need it; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name of the single logical table backing every record.
    pub table_name: String,
    /// Topic receiving entity-changed notifications.
    pub topic_arn: String,
    /// Server-side cap applied to caller-requested page sizes.
    pub page_limit: i32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            table_name: env_or("PRIMARY_TABLE_NAME", ""),
            topic_arn: env_or("PRIMARY_SNS_TOPIC_ARN", ""),
            page_limit: MAX_PAGE_LIMIT,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}
