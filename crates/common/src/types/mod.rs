use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body of every non-2xx JSON response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageBody {
    pub message: String,
    /// Echo of the rejected request body, present on validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<serde_json::Value>,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), request: None }
    }

    pub fn with_request(message: impl Into<String>, request: serde_json::Value) -> Self {
        Self { message: message.into(), request: Some(request) }
    }
}
