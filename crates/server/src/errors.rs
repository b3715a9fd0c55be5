use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::MessageBody;
use service::errors::ServiceError;
use tracing::error;

/// JSON error response: `{"message": ..., "request": ...}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub body: MessageBody,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, body: MessageBody::new(message) }
    }

    /// 400 that echoes the rejected request body back to the caller.
    pub fn validation(message: impl Into<String>, request: serde_json::Value) -> Self {
        Self { status: StatusCode::BAD_REQUEST, body: MessageBody::with_request(message, request) }
    }

    /// Map a service error, attaching `request` to validation failures when given.
    pub fn from_service(e: ServiceError, request: Option<&serde_json::Value>) -> Self {
        match e {
            ServiceError::Validation(msg) => match request {
                Some(body) => Self::validation(msg, body.clone()),
                None => Self::new(StatusCode::BAD_REQUEST, msg),
            },
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            ServiceError::Conflict(msg) => Self::new(StatusCode::CONFLICT, msg),
            ServiceError::Db(msg) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, format!("database error: {msg}")),
        }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self { Self::from_service(e, None) }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.body.message, "request failed");
        }
        (self.status, Json(self.body)).into_response()
    }
}
