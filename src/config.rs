//! Configuration for opening a tasks database.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::db::{start_tasks_db, TasksDb};
use crate::error::{Result, TasksDbError};
use crate::store::BackendKind;

/// Where and how to open a tasks database.
///
/// # Example Configuration File
///
/// ```toml
/// path = "/var/lib/tasks"
/// kind = "tiny"
/// ```
///
/// `kind` may be omitted and defaults to `tiny`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbConfig {
    /// Root directory of the database.
    pub path: PathBuf,

    /// Backend variant to open.
    #[serde(default)]
    pub kind: BackendKind,
}

impl DbConfig {
    /// Create a configuration for `path` using the default backend.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: BackendKind::default(),
        }
    }

    /// Set the backend variant.
    #[must_use]
    pub fn with_kind(mut self, kind: BackendKind) -> Self {
        self.kind = kind;
        self
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// [`TasksDbError::Io`] if the file cannot be read, [`TasksDbError::Config`]
    /// if it does not parse.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| TasksDbError::io(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasks::{BackendKind, DbConfig};
    ///
    /// let config = DbConfig::from_toml(r#"
    ///     path = "/tmp/tasks"
    ///     kind = "memory"
    /// "#).unwrap();
    /// assert_eq!(config.kind, BackendKind::Memory);
    /// ```
    ///
    /// # Errors
    ///
    /// [`TasksDbError::Config`] on malformed TOML, a missing `path`, or an
    /// unknown `kind`.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| TasksDbError::Config(e.to_string()))
    }

    /// Open a [`TasksDb`] described by this configuration.
    ///
    /// # Errors
    ///
    /// Same as [`TasksDb::open`].
    pub fn open(&self) -> Result<TasksDb> {
        TasksDb::open(&self.path, self.kind)
    }

    /// Start the process-wide session described by this configuration.
    ///
    /// # Errors
    ///
    /// Same as [`start_tasks_db`].
    pub fn start(&self) -> Result<()> {
        start_tasks_db(&self.path, self.kind.as_str())
    }
}
