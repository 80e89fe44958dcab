//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// Every handler returns `Result<_, AppError>`, so each request ends in
/// exactly one response whichever way it fails.
///
/// # Error Categories
///
/// - **Authentication Errors**: missing, invalid or expired session token
/// - **Authorization Errors**: token owner does not own the requested resource
/// - **Resource Errors**: requested document not found
/// - **Validation Errors**: malformed body or identifier
/// - **Internal Errors**: store or token signing failures (details never leave the server)
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Token could not be signed.
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Session cookie is missing, invalid or expired.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("unauthorized access")]
    Unauthorized,

    /// Authenticated identity does not match the requested owner.
    ///
    /// Returns HTTP 403 Forbidden.
    #[error("forbidden access")]
    Forbidden,

    /// Requested document does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Path identifier is not a valid document id.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("invalid identifier")]
    InvalidId,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),
}

impl AppError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidId | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `Unauthorized` → 401 Unauthorized
/// - `Forbidden` → 403 Forbidden
/// - `NotFound` → 404 Not Found
/// - `InvalidId`, `InvalidRequest` → 400 Bad Request
/// - `Database`, `Token` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Map each error variant to (error code, message)
        let (code, message) = match self {
            AppError::Unauthorized => ("unauthorized", self.to_string()),
            AppError::Forbidden => ("forbidden", self.to_string()),
            AppError::NotFound(_) => ("not_found", self.to_string()),
            AppError::InvalidId => ("invalid_id", self.to_string()),
            AppError::InvalidRequest(ref msg) => ("invalid_request", msg.clone()),
            AppError::Database(ref e) => {
                tracing::error!(error = %e, "store operation failed");
                ("internal_error", "An internal error occurred".to_string())
            }
            AppError::Token(ref e) => {
                tracing::error!(error = %e, "token signing failed");
                ("internal_error", "An internal error occurred".to_string())
            }
        };

        // Build JSON response body
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
