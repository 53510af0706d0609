//! HTTP error mapping.
//!
//! Every failure leaves the server as a non-2xx status with an `{"error": "..."}` body.

use api_shared::ErrorRes;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use medcare_core::MedcareError;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<MedcareError> for ApiError {
    fn from(e: MedcareError) -> Self {
        let status = match &e {
            MedcareError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            MedcareError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => {
                tracing::error!("storage failure: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorRes {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// `Json` extractor whose rejections use the `{error}` body and status 400.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
