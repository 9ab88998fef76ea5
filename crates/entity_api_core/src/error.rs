use thiserror::Error;

/// Canonical error type for every adapter and handler operation.
///
/// `Store` and `Publish` wrap transport detail that is logged but never
/// returned to API callers. The adapter layer never retries; retry policy
/// belongs to the caller or the SDK transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Uniqueness violation on a guarded create.
    #[error("conflict: record already exists")]
    Conflict,

    /// Read or update target is absent.
    #[error("not found")]
    NotFound,

    /// Malformed pagination cursor or inbound payload.
    #[error("decode error: {0}")]
    Decode(String),

    /// Caller-supplied input failed basic shape checks.
    #[error("validation error: {0}")]
    Validation(String),

    /// Underlying store or transport failure.
    #[error("store error: {0}")]
    Store(String),

    /// Change-notification publish failure. The triggering mutation has
    /// already committed by the time this is raised.
    #[error("publish error: {0}")]
    Publish(String),
}

impl ApiError {
    /// HTTP status the error maps to at the API boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Decode(_) | Self::Validation(_) => 400,
            Self::Store(_) | Self::Publish(_) => 500,
        }
    }

    /// Message safe to put in a response body. Internal store and publish
    /// detail stays out of it.
    pub fn public_message(&self) -> &str {
        match self {
            Self::NotFound => "Could not find entity",
            Self::Conflict => "Entity already exists",
            Self::Decode(message) | Self::Validation(message) => message,
            Self::Store(_) | Self::Publish(_) => "Internal Server Error",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict)
    }
}
