//! Unified error types for all layers of the application.

use crate::i18n::MessageKey;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of Emporium.
///
/// Variants raised by business rules carry a [`MessageKey`] together with
/// the message already resolved for the caller's locale.
#[derive(Error, Debug)]
pub enum EmporiumError {
    // ============ Request Errors ============
    /// Referenced entity missing, or a listing parameter out of range.
    #[error("Bad request: {message}")]
    BadRequest { key: MessageKey, message: String },

    /// Entity addressed directly by id does not exist.
    #[error("Not found: {message}")]
    NotFound { key: MessageKey, message: String },

    /// Request body failed field validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict error (e.g., duplicate entry)
    #[error("Conflict: {0}")]
    Conflict(String),

    // ============ Authentication/Authorization Errors ============
    /// Caller is not the owner of a product or company, or is not logged in.
    #[error("Unauthorized: {message}")]
    Unauthorized { key: MessageKey, message: String },

    /// Caller is authenticated but lacks permission (review author, self, admin).
    #[error("Forbidden: {message}")]
    Forbidden { key: MessageKey, message: String },

    /// Invalid token
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token expired
    #[error("Token expired")]
    TokenExpired,

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    // ============ Internal Errors ============
    /// Internal error, including a single-row write that touched nothing.
    #[error("Internal error: {message}")]
    Internal { key: MessageKey, message: String },

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EmporiumError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest { .. } | Self::Validation(_) => 400,
            Self::NotFound { .. } => 404,
            Self::Conflict(_) => 409,
            Self::Unauthorized { .. } | Self::InvalidToken(_) | Self::TokenExpired => 401,
            Self::Forbidden { .. } => 403,
            Self::Database(_)
            | Self::Configuration(_)
            | Self::Cache(_)
            | Self::Internal { .. }
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "BAD_REQUEST",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Internal { .. } | Self::Other(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Returns the message key, for variants raised by business rules.
    #[must_use]
    pub const fn message_key(&self) -> Option<MessageKey> {
        match self {
            Self::BadRequest { key, .. }
            | Self::NotFound { key, .. }
            | Self::Unauthorized { key, .. }
            | Self::Forbidden { key, .. }
            | Self::Internal { key, .. } => Some(*key),
            _ => None,
        }
    }

    /// Creates a bad request error.
    #[must_use]
    pub fn bad_request<T: Into<String>>(key: MessageKey, message: T) -> Self {
        Self::BadRequest {
            key,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found<T: Into<String>>(key: MessageKey, message: T) -> Self {
        Self::NotFound {
            key,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized<T: Into<String>>(key: MessageKey, message: T) -> Self {
        Self::Unauthorized {
            key,
            message: message.into(),
        }
    }

    /// Creates a forbidden error.
    #[must_use]
    pub fn forbidden<T: Into<String>>(key: MessageKey, message: T) -> Self {
        Self::Forbidden {
            key,
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(key: MessageKey, message: T) -> Self {
        Self::Internal {
            key,
            message: message.into(),
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for EmporiumError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::Conflict(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return Self::bad_request(MessageKey::ReferenceViolation, db_err.message());
            }
        }
        Self::Database(err.to_string())
    }
}

impl From<serde_json::Error> for EmporiumError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(
            MessageKey::InternalError,
            format!("JSON serialization error: {}", err),
        )
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message, localized when a message key is present
    pub message: String,
    /// Message key the text was resolved from
    #[serde(rename = "messageKey", skip_serializing_if = "Option::is_none")]
    pub message_key: Option<String>,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
    /// Request trace ID for debugging
    #[serde(rename = "traceId", skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from an `EmporiumError`.
    ///
    /// Keyed variants expose only the localized text; infrastructure
    /// variants keep their prefixed display form.
    #[must_use]
    pub fn from_error(error: &EmporiumError) -> Self {
        let message = match error {
            EmporiumError::BadRequest { message, .. }
            | EmporiumError::NotFound { message, .. }
            | EmporiumError::Unauthorized { message, .. }
            | EmporiumError::Forbidden { message, .. }
            | EmporiumError::Internal { message, .. } => message.clone(),
            other => other.to_string(),
        };

        Self {
            code: error.error_code().to_string(),
            message,
            message_key: error.message_key().map(|k| k.as_str().to_string()),
            details: None,
            trace_id: None,
        }
    }

    /// Sets the trace ID.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&EmporiumError> for ErrorResponse {
    fn from(error: &EmporiumError) -> Self {
        Self::from_error(error)
    }
}
