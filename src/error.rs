//! Error types for wcif-gate
//!
//! This module defines the error hierarchy used throughout the application.
//! We use `thiserror` for library-style errors that are part of the API,
//! and convert to HTTP responses at the boundary (see [`http_mapper`]).

pub mod http_mapper;

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Access error: {0}")]
    Access(#[from] AccessError),

    #[error("Event synchronization error: {0}")]
    Sync(#[from] SyncError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Authorization failures raised by the access decision engine
///
/// `NotFound` is deliberately the same value whether the competition does
/// not exist or is hidden from the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("Please log in")]
    AuthenticationRequired,

    #[error("Missing required scope '{0}'")]
    MissingScope(String),

    #[error("Not authorized to manage competition")]
    NotPermitted,

    #[error("Competition with id {0} not found")]
    NotFound(String),

    #[error("Invalid authenticity token")]
    InvalidCsrfToken,
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// JSON pointer into the payload (`""` is the payload root)
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Failures of the WCIF event replacement pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("The events payload is invalid: {}", join_field_errors(.0))]
    SchemaInvalid(Vec<FieldError>),

    #[error("Unknown event type '{0}'")]
    UnknownEventType(String),

    #[error("The events could not be saved: {0}")]
    PersistenceRejected(String),

    #[error("Competition with id {0} not found")]
    CompetitionVanished(String),
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Persistence layer errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Competition not found: {0}")]
    NotFound(String),

    #[error("Competition already exists: {0}")]
    Duplicate(String),

    /// A domain constraint was violated at commit time
    #[error("{0}")]
    Rejected(String),

    #[error("Failed to seed store: {0}")]
    Seed(String),
}

impl From<StoreError> for SyncError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => SyncError::CompetitionVanished(id),
            StoreError::Rejected(details) => SyncError::PersistenceRejected(details),
            other => SyncError::PersistenceRejected(other.to_string()),
        }
    }
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for access checks
pub type AccessResult<T> = std::result::Result<T, AccessError>;

/// Result type alias for event synchronization
pub type SyncResult<T> = std::result::Result<T, SyncError>;
