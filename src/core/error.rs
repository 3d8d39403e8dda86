//! Typed error handling for the roster service
//!
//! Errors are grouped by category so callers can handle them specifically:
//!
//! - [`PageRequestError`]: invalid paging input, rejected before any query
//! - [`QueryError`]: the underlying dataset access failed
//! - [`StorageError`]: write-path integrity failures in a backend
//! - [`ConfigError`]: configuration loading and parsing
//! - [`FixtureError`]: fixture file loading
//!
//! An empty result set is not an error anywhere in this crate: a search
//! that matches nothing yields a page with zero rows and a total of zero.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type for the roster service
#[derive(Debug, Error)]
pub enum RosterError {
    /// Invalid paging input, rejected before any query is issued
    #[error(transparent)]
    PageRequest(#[from] PageRequestError),

    /// Dataset access failure while executing a query
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Storage write-path failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Fixture loading errors
    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl RosterError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RosterError::PageRequest(_) => StatusCode::BAD_REQUEST,
            RosterError::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RosterError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RosterError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RosterError::Fixture(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RosterError::PageRequest(e) => e.error_code(),
            RosterError::Query(_) => "QUERY_EXECUTION_FAILED",
            RosterError::Storage(e) => e.error_code(),
            RosterError::Config(_) => "CONFIG_ERROR",
            RosterError::Fixture(_) => "FIXTURE_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            RosterError::PageRequest(PageRequestError::NonPositiveSize { size }) => {
                Some(serde_json::json!({ "size": size }))
            }
            RosterError::PageRequest(PageRequestError::NegativeIndex { index }) => {
                Some(serde_json::json!({ "index": index }))
            }
            RosterError::PageRequest(PageRequestError::InvalidSort { value }) => {
                Some(serde_json::json!({ "sort": value }))
            }
            RosterError::Storage(StorageError::UnknownGroup {
                person_id,
                group_id,
            }) => Some(serde_json::json!({
                "person_id": person_id,
                "group_id": group_id
            })),
            _ => None,
        }
    }
}

impl IntoResponse for RosterError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

/// Errors for paging input that is invalid on its face.
///
/// These are surfaced to the caller as bad requests and are never retried;
/// no query is issued for a request that fails this validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageRequestError {
    /// Page size must be a positive row count
    #[error("page size must be positive, got {size}")]
    NonPositiveSize { size: i64 },

    /// Page index must be zero or greater
    #[error("page index must not be negative, got {index}")]
    NegativeIndex { index: i64 },

    /// Sort expression did not parse
    #[error("invalid sort expression '{value}', expected field[:asc|desc]")]
    InvalidSort { value: String },
}

impl PageRequestError {
    pub fn error_code(&self) -> &'static str {
        match self {
            PageRequestError::NonPositiveSize { .. } => "INVALID_PAGE_SIZE",
            PageRequestError::NegativeIndex { .. } => "INVALID_PAGE_INDEX",
            PageRequestError::InvalidSort { .. } => "INVALID_SORT",
        }
    }
}

/// Errors from the underlying dataset access.
///
/// The core does not retry these; retry policy, if any, belongs to the
/// backend. A count query failing after a successful fetch still fails the
/// whole page request, partial results are never returned.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The backend failed to execute a query
    #[error("query execution failed: {message}")]
    Execution { message: String },

    /// The backend is not reachable at all
    #[error("datastore '{backend}' is unavailable")]
    Unavailable { backend: String },
}

/// Errors from the storage write path (loader-facing)
#[derive(Debug, Error)]
pub enum StorageError {
    /// A person referenced a group id that does not exist
    #[error("person {person_id} references unknown group {group_id}")]
    UnknownGroup { person_id: u64, group_id: u64 },

    /// An operation addressed a person id that does not exist
    #[error("person {person_id} not found")]
    UnknownPerson { person_id: u64 },

    /// A shared lock was poisoned by a panicking writer
    #[error("datastore lock poisoned: {message}")]
    LockPoisoned { message: String },
}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::UnknownGroup { .. } => "UNKNOWN_GROUP",
            StorageError::UnknownPerson { .. } => "UNKNOWN_PERSON",
            StorageError::LockPoisoned { .. } => "STORAGE_ERROR",
        }
    }
}

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse a configuration file
    #[error("failed to parse config '{file}': {message}")]
    Parse { file: String, message: String },

    /// Configuration file not found
    #[error("configuration file not found: {path}")]
    FileNotFound { path: String },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    Io { message: String },
}

/// Errors related to fixture loading
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Failed to read the fixture file
    #[error("failed to read fixture '{path}': {message}")]
    Io { path: String, message: String },

    /// Fixture file did not parse
    #[error("failed to parse fixture '{path}': {message}")]
    Parse { path: String, message: String },

    /// A fixture record was internally inconsistent
    #[error("invalid fixture record: {message}")]
    InvalidRecord { message: String },
}

/// A specialized Result type for roster operations
pub type RosterResult<T> = Result<T, RosterError>;
