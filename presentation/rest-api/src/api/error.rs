use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};

/// Error body returned by every failing endpoint
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error category, e.g. "ValidationError" or "Busy"
    pub name: String,
    /// Machine-readable error code, e.g. "basket.not_found"
    pub message: String,
}

impl ErrorResponse {
    pub fn validation(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            name: "ValidationError".to_string(),
            message: message.into(),
        })
    }
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}
