//! Error types for tasks database operations.
//!
//! Constructing a [`Task`](crate::Task) never fails; everything here comes
//! from opening, closing, or configuring a database handle.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while managing a tasks database.
///
/// # Examples
///
/// ```
/// use tasks::TasksDbError;
///
/// let err = TasksDbError::UnknownBackend("mongo".to_string());
/// assert!(err.to_string().contains("mongo"));
/// ```
#[derive(Debug, Error)]
pub enum TasksDbError {
    /// The backend name does not match any known [`BackendKind`](crate::BackendKind).
    #[error("unknown backend kind '{0}': expected 'tiny' or 'memory'")]
    UnknownBackend(String),

    /// The database root is missing or is not a directory.
    #[error("database root '{}' is not an existing directory", path.display())]
    InvalidPath {
        /// The rejected root.
        path: PathBuf,
    },

    /// Another live handle already holds this root.
    #[error("tasks database at '{}' is already open", path.display())]
    AlreadyOpen {
        /// The contested root.
        path: PathBuf,
    },

    /// A process-wide session is already running.
    #[error("tasks database session already started at '{}'", path.display())]
    AlreadyStarted {
        /// Root of the session that is currently active.
        path: PathBuf,
    },

    /// Filesystem failure while acquiring or releasing a backend.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// The path being operated on.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Configuration could not be read or parsed.
    #[error("invalid tasks database configuration: {0}")]
    Config(String),
}

/// Result type for tasks database operations.
pub type Result<T> = std::result::Result<T, TasksDbError>;

impl TasksDbError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
