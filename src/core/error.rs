//! Typed error handling for the biztime API
//!
//! Every handler returns [`BiztimeResult`]. The error converts itself into an
//! HTTP response whose body is always:
//!
//! ```json
//! { "error": { "message": "Invoice id '42' not found", "status": 404 } }
//! ```
//!
//! # Error Categories
//!
//! - [`ValidationError`]: a required field is absent or the body is malformed (400)
//! - [`EntityError`]: a key does not resolve to a row (404)
//! - [`RequestError`]: no route matches the path or method (404 / 405)
//! - [`StorageError`]: the persistence layer failed (500)
//! - [`ConfigError`]: configuration could not be loaded (startup only)
//!
//! Store implementations return `anyhow::Result`; anything they raise is
//! funnelled into [`BiztimeError::Internal`] and answered with a 500.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for the biztime API
#[derive(Debug)]
pub enum BiztimeError {
    /// Entity lookups that did not resolve
    Entity(EntityError),

    /// Request payload validation
    Validation(ValidationError),

    /// Requests that match no route
    Request(RequestError),

    /// Storage backend errors
    Storage(StorageError),

    /// Configuration errors
    Config(ConfigError),

    /// Anything else, including errors bubbling up from stores
    Internal(String),
}

impl fmt::Display for BiztimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BiztimeError::Entity(e) => write!(f, "{}", e),
            BiztimeError::Validation(e) => write!(f, "{}", e),
            BiztimeError::Request(e) => write!(f, "{}", e),
            BiztimeError::Storage(e) => write!(f, "{}", e),
            BiztimeError::Config(e) => write!(f, "{}", e),
            BiztimeError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for BiztimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BiztimeError::Entity(e) => Some(e),
            BiztimeError::Validation(e) => Some(e),
            BiztimeError::Request(e) => Some(e),
            BiztimeError::Storage(e) => Some(e),
            BiztimeError::Config(e) => Some(e),
            BiztimeError::Internal(_) => None,
        }
    }
}

/// Inner object of an error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable error message
    pub message: String,
    /// HTTP status code, repeated in the body
    pub status: u16,
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl BiztimeError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BiztimeError::Entity(e) => e.status_code(),
            BiztimeError::Validation(_) => StatusCode::BAD_REQUEST,
            BiztimeError::Request(e) => e.status_code(),
            BiztimeError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BiztimeError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BiztimeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error, used in logs
    pub fn error_code(&self) -> &'static str {
        match self {
            BiztimeError::Entity(e) => e.error_code(),
            BiztimeError::Validation(_) => "VALIDATION_ERROR",
            BiztimeError::Request(e) => e.error_code(),
            BiztimeError::Storage(_) => "STORAGE_ERROR",
            BiztimeError::Config(_) => "CONFIG_ERROR",
            BiztimeError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorBody {
                message: self.to_string(),
                status: self.status_code().as_u16(),
            },
        }
    }

    /// Shorthand for a not-found error on a keyed entity
    pub fn not_found(
        entity_type: &'static str,
        key_name: &'static str,
        key: impl fmt::Display,
    ) -> Self {
        BiztimeError::Entity(EntityError::NotFound {
            entity_type,
            key_name,
            key: key.to_string(),
        })
    }
}

impl IntoResponse for BiztimeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::warn!(code = self.error_code(), error = %self, "request rejected");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups
#[derive(Debug)]
pub enum EntityError {
    /// No row matches the key
    NotFound {
        entity_type: &'static str,
        key_name: &'static str,
        key: String,
    },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound {
                entity_type,
                key_name,
                key,
            } => write!(f, "{} {} '{}' not found", entity_type, key_name, key),
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
        }
    }
}

impl From<EntityError> for BiztimeError {
    fn from(err: EntityError) -> Self {
        BiztimeError::Entity(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors for requests that reach no handler
#[derive(Debug)]
pub enum RequestError {
    /// No route matches the path
    RouteNotFound { method: String, path: String },

    /// The path exists but not for this method
    MethodNotAllowed { method: String, path: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::RouteNotFound { method, path } => {
                write!(f, "No route for {} {}", method, path)
            }
            RequestError::MethodNotAllowed { method, path } => {
                write!(f, "Method {} not allowed on {}", method, path)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            RequestError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::RouteNotFound { .. } => "ROUTE_NOT_FOUND",
            RequestError::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
        }
    }
}

impl From<RequestError> for BiztimeError {
    fn from(err: RequestError) -> Self {
        BiztimeError::Request(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// One or more required fields were absent from the payload
    MissingFields(Vec<String>),

    /// A present field carries an unusable value
    FieldError { field: String, message: String },

    /// Body is not JSON or does not match the expected shape
    InvalidJson { message: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingFields(fields) => {
                let quoted: Vec<String> = fields.iter().map(|f| format!("'{}'", f)).collect();
                write!(f, "Please include {}", quoted.join(", "))
            }
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::InvalidJson { message } => {
                write!(f, "Invalid JSON: {}", message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for BiztimeError {
    fn from(err: ValidationError) -> Self {
        BiztimeError::Validation(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug)]
pub enum StorageError {
    /// Connection error
    ConnectionError { backend: String, message: String },

    /// Query execution error
    QueryError { backend: String, message: String },

    /// Uniqueness or foreign-key violation
    IntegrityError { message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ConnectionError { backend, message } => {
                write!(f, "Failed to connect to {}: {}", backend, message)
            }
            StorageError::QueryError { backend, message } => {
                write!(f, "{} query error: {}", backend, message)
            }
            StorageError::IntegrityError { message } => {
                write!(f, "Data integrity error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for BiztimeError {
    fn from(err: StorageError) -> Self {
        BiztimeError::Storage(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration or environment
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    FileNotFound { path: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for BiztimeError {
    fn from(err: ConfigError) -> Self {
        BiztimeError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<validator::ValidationErrors> for BiztimeError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        BiztimeError::Validation(ValidationError::MissingFields(fields))
    }
}

impl From<serde_yaml::Error> for BiztimeError {
    fn from(err: serde_yaml::Error) -> Self {
        BiztimeError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

/// Store failures arrive as `anyhow::Error`
impl From<anyhow::Error> for BiztimeError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<StorageError>() {
            Ok(storage) => BiztimeError::Storage(storage),
            Err(other) => BiztimeError::Internal(format!("{:#}", other)),
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for biztime handlers
pub type BiztimeResult<T> = Result<T, BiztimeError>;
