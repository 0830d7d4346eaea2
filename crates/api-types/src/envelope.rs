use serde::{Deserialize, Serialize};

/// Body of every successful response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Body of every failed response. Never carries internal error detail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Fixed client-facing error messages.
pub mod messages {
    pub const INVALID_QUERY: &str = "Invalid query parameters";
    pub const NOT_FOUND: &str = "Taxi rank not found";
    pub const INTERNAL: &str = "Internal server error";
}
