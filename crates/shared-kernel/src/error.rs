// crates/shared-kernel/src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Root error type shared across the workspace.
#[derive(Debug, Error)]
pub enum VisitCounterError {
    /// Adds human context while preserving original error as the source.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<VisitCounterError>,
    },

    #[error("Configuration error: {0}")]
    Domain(#[from] DomainError),

    #[error("Storage error: {0}")]
    Infrastructure(#[from] InfrastructureError),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),
}

impl VisitCounterError {
    /// Whether the root cause is a rejected configuration value.
    ///
    /// Looks through any number of `Context` wrappers.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::Context { source, .. } => source.is_configuration(),
            Self::Domain(_) => true,
            Self::Infrastructure(_) | Self::Application(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, VisitCounterError>;

/// Domain-layer specific errors.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid value for option '{option}': {reason}")]
    InvalidOption { option: String, reason: String },

    #[error("unknown option '{option}'")]
    UnknownOption { option: String },

    #[error("options file '{path}' is invalid: {details}")]
    OptionsFile { path: PathBuf, details: String },
}

pub type DomainResult<T> = std::result::Result<T, DomainError>;

/// Application-layer errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("unable to determine the visitor's address while counting unique visitors only")]
    VisitorAddressUnavailable,
}

/// Which lock a storage operation asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockKind {
    Shared,
    Exclusive,
}

impl std::fmt::Display for LockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shared => f.write_str("shared"),
            Self::Exclusive => f.write_str("exclusive"),
        }
    }
}

/// Infrastructure-layer errors.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    #[error("'{path}' could not be opened: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The lock is held elsewhere and the lock policy did not allow waiting (any longer).
    #[error("Unable to acquire {kind} lock on '{path}'")]
    LockUnavailable { path: PathBuf, kind: LockKind },

    #[error("Locking '{path}' ({kind}) failed: {source}")]
    LockFailed {
        path: PathBuf,
        kind: LockKind,
        #[source]
        source: std::io::Error,
    },

    #[error("'{path}' does not contain a valid {record} record: {details}")]
    Parse {
        path: PathBuf,
        record: &'static str,
        details: String,
    },

    #[error("Failed to parse {format} input: {details}")]
    SerializationError { format: String, details: String },
}

pub type InfraResult<T> = std::result::Result<T, InfrastructureError>;

impl From<serde_json::Error> for InfrastructureError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            format: "JSON".to_string(),
            details: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for VisitCounterError {
    fn from(err: serde_json::Error) -> Self {
        InfrastructureError::from(err).into()
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml::Error> for InfrastructureError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerializationError {
            format: "YAML".to_string(),
            details: err.to_string(),
        }
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml::Error> for VisitCounterError {
    fn from(err: serde_yaml::Error) -> Self {
        InfrastructureError::from(err).into()
    }
}

/// Extension trait to add additional context to results.
pub trait ErrorContext<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<VisitCounterError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| VisitCounterError::Context {
            context: context.into(),
            source: Box::new(e.into()),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| VisitCounterError::Context {
            context: f(),
            source: Box::new(e.into()),
        })
    }
}
