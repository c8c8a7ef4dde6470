//! HTTP response handling for errors

use super::types::ProviderError;
use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for ProviderError {
    fn status_code(&self) -> StatusCode {
        match self {
            ProviderError::NotFound(_) => StatusCode::NOT_FOUND,
            ProviderError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ProviderError::NotRunning => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let (error_code, message) = match self {
            ProviderError::NotFound(_) => ("NOT_FOUND", self.to_string()),
            ProviderError::MethodNotAllowed(_) => ("METHOD_NOT_ALLOWED", self.to_string()),
            ProviderError::NotRunning => ("NOT_RUNNING", self.to_string()),
            // Filesystem details stay in the server log.
            _ => ("INTERNAL_ERROR", "An internal error occurred".to_string()),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
            },
        };

        let mut builder = HttpResponse::build(status_code);
        if let ProviderError::MethodNotAllowed(_) = self {
            builder.insert_header((header::ALLOW, "GET, HEAD"));
        }
        builder.json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
