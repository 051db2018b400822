use serde::Serialize;
use utoipa::ToSchema;

/// Message-only response, `{"message": ...}` on the wire
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
