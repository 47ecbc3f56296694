//! # API Errors
//!
//! Maps catalog and database errors onto HTTP responses.
//!
//! ## Response Shape
//! ```text
//! HTTP/1.1 422 Unprocessable Entity
//! {
//!   "code": "INVALID_REFERENCE",
//!   "message": "author id 12 does not exist",
//!   "errors": [],
//!   "traceId": "5f0c3c1e-..."
//! }
//! ```
//!
//! | Kind                | Status |
//! |---------------------|--------|
//! | `VALIDATION_ERROR`  | 400    |
//! | `NOT_FOUND`         | 404    |
//! | `DUPLICATE_ENTITY`  | 409    |
//! | `INVALID_STATE`     | 409    |
//! | `INVALID_REFERENCE` | 422    |
//! | `STORE_FAILURE`     | 500    |

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_core::{CatalogError, ErrorKind};
use catalog_db::DbError;
use serde::Serialize;
use tracing::{error, warn};
use uuid::Uuid;

const STORE_FAILURE_MESSAGE: &str = "An internal storage error occurred";

/// Serialized error body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    pub errors: Vec<String>,
    pub trace_id: String,
}

/// An error on its way to the client.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub errors: Vec<String>,
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP status for each error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::DuplicateEntity | ErrorKind::InvalidState => StatusCode::CONFLICT,
        ErrorKind::InvalidReference => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::StoreFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    fn store_failure() -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: ErrorKind::StoreFailure.code(),
            message: STORE_FAILURE_MESSAGE.to_string(),
            errors: Vec::new(),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        let kind = err.kind();

        match err {
            CatalogError::Store(store) => {
                error!(error = %store, "Store failure");
                ApiError::store_failure()
            }
            CatalogError::Validation(violations) => ApiError {
                status: status_for(kind),
                code: kind.code(),
                message: "Request validation failed".to_string(),
                errors: violations
                    .violations()
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            },
            other => ApiError {
                status: status_for(kind),
                code: kind.code(),
                message: other.to_string(),
                errors: Vec::new(),
            },
        }
    }
}

/// Failures opening or finishing a transaction scope.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        error!(error = %err, "Database failure outside a service call");
        ApiError::store_failure()
    }
}

/// Every body the extractor rejects is a validation failure.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(
            status = rejection.status().as_u16(),
            error = %rejection.body_text(),
            "Rejected request body"
        );
        ApiError {
            status: status_for(ErrorKind::Validation),
            code: ErrorKind::Validation.code(),
            message: "Malformed request body".to_string(),
            errors: vec![rejection.body_text()],
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let trace_id = Uuid::new_v4().to_string();

        tracing::debug!(
            trace_id = %trace_id,
            code = self.code,
            status = self.status.as_u16(),
            "Request error"
        );

        let body = ErrorBody {
            code: self.code,
            message: self.message,
            errors: self.errors,
            trace_id,
        };
        (self.status, Json(body)).into_response()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
