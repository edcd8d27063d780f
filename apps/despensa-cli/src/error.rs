//! # API Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Despensa                               │
//! │                                                                         │
//! │  Front End                   Rust Backend                               │
//! │  ─────────                   ────────────                               │
//! │                                                                         │
//! │  despensa cart add <id>                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Unknown product? ─── CoreError::ProductNotFound ──┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Bad quantity? ──── ValidationError::InvalidFormat ─ ApiError ──►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Store mutations never fail: persistence errors are logged inside      │
//! │  the containers and only storage *startup* failures reach ApiError.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use despensa_core::{CoreError, ValidationError};
use despensa_storage::StorageError;
use serde::Serialize;

use crate::config::ConfigError;

/// API error returned from commands.
///
/// ## Serialization
/// This is what `--json` prints when a command fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: arroz-redondo"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Wrong credentials, or the command needs a logged-in user
    Unauthenticated,

    /// Snapshot storage could not be opened
    StorageError,

    /// Configuration could not be loaded
    ConfigError,

    /// Internal error
    Internal,
}

impl ErrorCode {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::NotFound | ErrorCode::ValidationError => 2,
            ErrorCode::Unauthenticated => 3,
            ErrorCode::StorageError | ErrorCode::ConfigError => 4,
            ErrorCode::Internal => 1,
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

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an authentication error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthenticated, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::Validation(e) => ApiError::from(e),
            other @ CoreError::QuantityTooLarge { .. } => ApiError::validation(other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts storage errors to API errors.
impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                tracing::error!("Storage connection failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Could not open local storage")
            }
            StorageError::MigrationFailed(e) => {
                tracing::error!("Storage migration failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Local storage migration failed")
            }
            other => {
                tracing::error!("Storage error: {}", other);
                ApiError::new(ErrorCode::StorageError, "Local storage operation failed")
            }
        }
    }
}

/// Converts configuration errors to API errors.
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
