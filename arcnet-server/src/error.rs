//! API error handling module
//!
//! Provides a unified error type for all API endpoints with structured error variants.

use arcnet_core::ArcnetError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// API error type with structured variants for different error categories
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad request - client provided invalid input
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Core error - SRS retrieval or parsing failed
    #[error("ARCNET error: {0}")]
    Arcnet(#[from] ArcnetError),
}

impl ApiError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Arcnet(e) => match e {
                // No data for the requested date → 404
                ArcnetError::ReportNotFound { .. } => StatusCode::NOT_FOUND,

                // Archive unreachable → 503, client may retry later
                ArcnetError::ReportDownload { .. } | ArcnetError::ArchiveError(_) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }

                // Archive answered with unusable content → 502
                ArcnetError::ReportMissing { .. } | ArcnetError::ReportParse { .. } => {
                    StatusCode::BAD_GATEWAY
                }
            },
        }
    }

    /// Get the error code for programmatic error handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "INVALID_INPUT",
            Self::Arcnet(e) => match e {
                ArcnetError::ReportNotFound { .. } => "SRS_NOT_FOUND",
                ArcnetError::ReportDownload { .. } => "SRS_DOWNLOAD_FAILED",
                ArcnetError::ReportMissing { .. } => "SRS_MISSING",
                ArcnetError::ReportParse { .. } => "SRS_MALFORMED",
                ArcnetError::ArchiveError(_) => "ARCHIVE_UNAVAILABLE",
            },
        }
    }

    /// Get sanitized error message for client response
    fn client_message(&self) -> String {
        match self {
            // Upstream locators and transport details stay in the logs
            Self::Arcnet(e) => match e {
                ArcnetError::ReportNotFound { .. } => e.to_string(),
                ArcnetError::ReportDownload { .. } => {
                    "SRS report could not be downloaded, try again later".to_string()
                }
                ArcnetError::ReportMissing { .. } => "SRS report was empty".to_string(),
                ArcnetError::ReportParse { .. } => "SRS report is malformed".to_string(),
                ArcnetError::ArchiveError(_) => "SRS archive unavailable".to_string(),
            },
            _ => self.to_string(),
        }
    }

    /// Get the error category for logging
    fn error_category(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Arcnet(_) => "arcnet",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let category = self.error_category();
        let code = self.error_code();
        let internal_message = self.to_string();
        let client_message = self.client_message();

        match &self {
            Self::BadRequest(_) | Self::Arcnet(ArcnetError::ReportNotFound { .. }) => {
                tracing::warn!(
                    status = %status,
                    category = category,
                    code = code,
                    error = %internal_message,
                    "Client error"
                );
            }
            Self::Arcnet(_) => {
                tracing::error!(
                    status = %status,
                    category = category,
                    code = code,
                    error = %internal_message,
                    client_message = %client_message,
                    "Upstream SRS error (internal details logged)"
                );
            }
        }

        let body = serde_json::json!({
            "error": client_message,
            "code": code,
        });

        (status, Json(body)).into_response()
    }
}
