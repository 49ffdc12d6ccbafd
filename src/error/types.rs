use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::middleware::logging::current_request_id;
use crate::models::ErrorResponse;

pub type AppResult<T> = Result<T, AppError>;

/// Failures raised while handling an upload.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing file in request: expected a multipart part named 'file' or 'resume'")]
    MissingFile,

    #[error("Invalid upload: {message}")]
    InvalidUpload { message: String },

    #[error("Upload too large: {message}")]
    UploadTooLarge { message: String },

    #[error("PDF parsing failed: {message}")]
    PdfParse { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingFile => "MISSING_FILE",
            AppError::InvalidUpload { .. } => "INVALID_UPLOAD",
            AppError::UploadTooLarge { .. } => "UPLOAD_TOO_LARGE",
            AppError::PdfParse { .. } => "PDF_PARSE_ERROR",
            AppError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFile => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidUpload { .. } => StatusCode::BAD_REQUEST,
            AppError::UploadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            // Unreadable documents are reported as server errors, matching
            // what existing clients of this endpoint expect.
            AppError::PdfParse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();
        let request_id = current_request_id().unwrap_or_else(|| Uuid::new_v4().to_string());
        let timestamp = chrono::Utc::now().to_rfc3339();

        tracing::error!(
            error_code = error_code,
            status_code = %status,
            request_id = %request_id,
            error_message = %message,
            "API error occurred"
        );

        let body = Json(ErrorResponse {
            detail: message,
            code: error_code.to_string(),
            request_id,
            timestamp,
        });

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal {
            message: format!("Extraction task failed: {}", err),
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::UploadTooLarge {
                message: err.body_text(),
            }
        } else {
            AppError::InvalidUpload {
                message: err.body_text(),
            }
        }
    }
}

impl From<axum::extract::multipart::MultipartRejection> for AppError {
    fn from(rejection: axum::extract::multipart::MultipartRejection) -> Self {
        AppError::InvalidUpload {
            message: rejection.body_text(),
        }
    }
}

impl AppError {
    pub fn invalid_upload(message: impl Into<String>) -> Self {
        AppError::InvalidUpload {
            message: message.into(),
        }
    }

    pub fn pdf_parse(message: impl Into<String>) -> Self {
        AppError::PdfParse {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal {
            message: message.into(),
        }
    }
}

/// Failures loading the reference skill spreadsheet. All of them are fatal at
/// startup.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to open skills workbook {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Sheet '{sheet}' not found in skills workbook {path}")]
    SheetMissing { path: PathBuf, sheet: String },

    #[error("Skills workbook {path} has no header row")]
    EmptySheet { path: PathBuf },

    #[error("Column '{column}' not found in skills workbook {path}")]
    ColumnMissing { path: PathBuf, column: String },
}
