//! API error mapping.
//!
//! Every request error renders as `{"Status":"<code>","Error":"<message>"}`
//! with the matching HTTP status; no request error terminates the process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use cryptomotor_core::QuoteError;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Error returned by API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn path_not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: "Path not found, see https://github.com/cryptomotor/cryptomotor".to_string(),
        }
    }
}

impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        let status = match err {
            QuoteError::ModelNotFound
            | QuoteError::VariantNotFound
            | QuoteError::CurrencyUnavailable => StatusCode::NOT_FOUND,
            QuoteError::SpotPriceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "Status": self.status.as_u16().to_string(),
            "Error": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}
