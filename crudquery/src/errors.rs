//! # Error Handling for List Endpoints
//!
//! Almost nothing a client sends to a list endpoint is an error: unknown
//! filter fields, unknown sort fields and malformed pagination all degrade to
//! defaults. What remains:
//!
//! - a filter value that cannot be converted to its field's type, or a string
//!   operator on a non-string field: `400 Bad Request` naming the field
//! - a database failure: `500 Internal Server Error` with a generic message
//!
//! Database error details are logged with `tracing` and never sent to the
//! client.
//!
//! ```rust,ignore
//! async fn list_workers(
//!     State(db): State<DatabaseConnection>,
//!     params: QueryParameters,
//! ) -> Result<Json<Page<Worker>>, ApiError> {
//!     Ok(Json(Worker::list(&db, &params).await?))
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;

use crate::filtering::FilterError;

/// API error type with automatic logging and sanitized responses
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request - Invalid input from user
    BadRequest {
        /// User-facing error message
        message: String,
        /// Public name of the offending query field, when there is one
        field: Option<String>,
    },

    /// 500 Internal Server Error - Database error (details logged, not exposed)
    Database {
        /// User-facing generic message
        message: String,
        /// Internal error (logged, not sent to user)
        internal: DbErr,
    },
}

impl ApiError {
    /// Create a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            field: None,
        }
    }

    /// Create a 500 Internal Server Error from a database error
    ///
    /// The database error details are logged but NOT sent to the user.
    #[must_use]
    pub fn database(err: DbErr) -> Self {
        Self::Database {
            message: "A database error occurred".to_string(),
            internal: err,
        }
    }

    /// HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing error message (sanitized)
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::BadRequest { message, .. } | Self::Database { message, .. } => message,
        }
    }

    /// Log internal error details (not sent to user)
    fn log_internal(&self) {
        match self {
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "Database error occurred");
            }
            Self::BadRequest { message, field } => {
                tracing::debug!(error = %message, field = ?field, "Rejected list query");
            }
        }
    }
}

/// Error response sent to users (sanitized)
#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();

        let field = match &self {
            Self::BadRequest { field, .. } => field.as_deref(),
            Self::Database { .. } => None,
        };
        let body = ErrorResponse {
            error: self.user_message(),
            field,
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Database { internal, .. } => Some(internal),
            Self::BadRequest { .. } => None,
        }
    }
}

/// Every `DbErr` reaching a list endpoint is a 500.
impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self::database(err)
    }
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        Self::BadRequest {
            message: err.to_string(),
            field: Some(err.field().to_string()),
        }
    }
}
