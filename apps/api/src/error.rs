//! # API Error Type
//!
//! Unified error type for the HTTP handlers. Every repository error maps
//! onto one `ApiError`, which serializes as the response body the clients
//! see:
//!
//! ```json
//! { "error": "Producto no encontrado" }
//! ```
//!
//! NoMatch is the one deliberate exception: it is an empty search result,
//! not a failure, and its body uses `mensaje` instead of `error` so clients
//! can tell the two 404s apart.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use tienda_core::CoreError;
use tienda_store::StoreError;

/// API error carried out of a handler.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code, decides the HTTP status.
    pub code: ErrorCode,

    /// Human-readable Spanish message, becomes the response body.
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Referential integrity, duplicate email or stock shortfall (409)
    Conflict,

    /// Credential mismatch (401)
    Unauthorized,

    /// Empty search result (404, `mensaje` body)
    NoMatch,

    /// Storage failure (500)
    StorageError,
}

impl ErrorCode {
    fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound | ErrorCode::NoMatch => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::StorageError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Empty search result. Not a true failure; surfaced as 404 with a
    /// distinct `mensaje` body.
    pub fn no_match(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NoMatch, message)
    }

    /// Internal failure with a generic outward message.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::StorageError, message)
    }
}

/// Converts storage-layer errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(core) => ApiError::from(core),
            StoreError::Missing(_) | StoreError::Corrupt { .. } | StoreError::Io { .. } => {
                // Log the cause, return a generic message.
                tracing::error!(error = %err, "Fallo de almacenamiento");
                ApiError::internal("Error de almacenamiento")
            }
        }
    }
}

/// Converts domain errors to API errors. The display string of the domain
/// error is already the user-facing message.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::ProductoNoEncontrado { .. }
            | CoreError::UsuarioNoEncontrado { .. }
            | CoreError::VentaNoEncontrada { .. } => ErrorCode::NotFound,
            CoreError::StockInsuficiente { .. }
            | CoreError::EmailRegistrado { .. }
            | CoreError::ProductoEnVentas { .. }
            | CoreError::UsuarioConVentas { .. } => ErrorCode::Conflict,
            CoreError::CredencialesInvalidas => ErrorCode::Unauthorized,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        ApiError::new(code, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status();
        let body = match self.code {
            ErrorCode::NoMatch => json!({ "mensaje": self.message }),
            _ => json!({ "error": self.message }),
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================
