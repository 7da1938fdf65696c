//! Error types for vCloud Inventory
//!
//! This module defines the crate-level error type. Failures of the HTTP/XML
//! layer are carried as [`RequestError`] and wrapped here.

use std::path::PathBuf;
use thiserror::Error;

use crate::vcloud::RequestError;

/// Main error type for inventory operations
#[derive(Error, Debug)]
pub enum InventoryError {
    /// I/O error while reading settings or writing an export
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file could not be interpreted
    #[error("Settings error: {0}")]
    SettingsError(String),

    /// An environment pattern in the settings file is not a valid regex
    #[error("Invalid pattern '{pattern}' for environment '{environment}': {source}")]
    InvalidPattern {
        environment: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Login rejected by the API
    #[error("Authentication failed for '{user}' at '{url}': {message}")]
    AuthenticationError {
        user: String,
        url: String,
        message: String,
    },

    /// An API call was made without a session token
    #[error("Not logged in to the vCloud API")]
    NotLoggedIn,

    /// HTTP or XML failure talking to the API
    #[error(transparent)]
    Request(#[from] RequestError),

    /// A server record has no virtual datacenter to operate on
    #[error("Server '{0}' has no virtual datacenter")]
    MissingVdc(String),

    /// The named catalog does not exist in the organization
    #[error("Catalog '{catalog}' not found in organization '{organization}'")]
    CatalogNotFound {
        catalog: String,
        organization: String,
    },

    /// No server with the requested name was found
    #[error("Server not found: {0}")]
    ServerNotFound(String),

    /// An asynchronous vCloud task ended unsuccessfully
    #[error("Task '{operation}' ended with status '{status}': {message}")]
    TaskFailed {
        operation: String,
        status: String,
        message: String,
    },

    /// Operation timed out
    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),

    /// Spreadsheet could not be produced
    #[error("Export error: {0}")]
    ExportError(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<InventoryError>,
    },
}

impl InventoryError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an authentication error
    pub fn auth(
        user: impl Into<String>,
        url: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::AuthenticationError {
            user: user.into(),
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a settings error
    pub fn settings(message: impl Into<String>) -> Self {
        Self::SettingsError(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Check if this error is worth retrying
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Request(request) => request.is_transient(),
            Self::WithContext { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::WithContext { source, .. } => source.path(),
            _ => None,
        }
    }
}

/// Result type alias for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;

impl From<std::io::Error> for InventoryError {
    fn from(err: std::io::Error) -> Self {
        InventoryError::Io {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for InventoryError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        InventoryError::ExportError(err.to_string())
    }
}

impl From<serde_json::Error> for InventoryError {
    fn from(err: serde_json::Error) -> Self {
        InventoryError::ExportError(err.to_string())
    }
}

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Add path context to an I/O error
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| InventoryError::io(path, e))
    }
}
