//! Storage backend kinds and the backend trait.
//!
//! # Architecture
//!
//! A [`TasksDb`](crate::TasksDb) owns exactly one boxed [`StorageBackend`].
//! Backends are selected by [`BackendKind`], which can be parsed from the
//! short names used in configuration (`"tiny"`, `"memory"`).
//!
//! # Backends
//!
//! - [`TinyBackend`](tiny::TinyBackend) -- Lightweight backend rooted at an
//!   on-disk directory. Claims the directory with a lock marker for as long
//!   as it is open.
//! - [`MemoryBackend`](memory::MemoryBackend) -- In-process backend that never
//!   touches the filesystem.
//!
//! Backends only know how to be acquired and released. Reading and writing
//! task records is not part of this trait.

pub mod memory;
pub mod tiny;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TasksDbError};

pub use memory::MemoryBackend;
pub use tiny::TinyBackend;

/// The storage variant a database handle is opened against.
///
/// # Examples
///
/// ```
/// use tasks::BackendKind;
///
/// let kind: BackendKind = "tiny".parse().unwrap();
/// assert_eq!(kind, BackendKind::Tiny);
/// assert_eq!(kind.to_string(), "tiny");
/// assert_eq!(BackendKind::default(), BackendKind::Tiny);
/// assert!("mongo".parse::<BackendKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Directory-rooted lightweight backend.
    #[default]
    Tiny,
    /// In-process backend with no filesystem footprint.
    Memory,
}

impl BackendKind {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tiny => "tiny",
            Self::Memory => "memory",
        }
    }

    /// Acquires a backend of this kind rooted at `root`.
    ///
    /// # Errors
    ///
    /// Whatever the selected backend's `open` returns; see
    /// [`TinyBackend::open`] and [`MemoryBackend::open`].
    pub fn open(self, root: &Path) -> Result<Box<dyn StorageBackend>> {
        let backend: Box<dyn StorageBackend> = match self {
            Self::Tiny => Box::new(TinyBackend::open(root)?),
            Self::Memory => Box::new(MemoryBackend::open(root)),
        };
        Ok(backend)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = TasksDbError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tiny" => Ok(Self::Tiny),
            "memory" => Ok(Self::Memory),
            _ => Err(TasksDbError::UnknownBackend(s.to_string())),
        }
    }
}

/// An acquired storage backend.
///
/// # Release
///
/// [`close`](StorageBackend::close) must be idempotent: the first call
/// releases whatever the backend acquired, later calls return `Ok(())`
/// without doing anything. [`TasksDb`](crate::TasksDb) relies on this to
/// release from both `close` and `Drop`.
///
/// # Thread Safety
///
/// Implementations must be `Send` so a handle can sit in the process-wide
/// session slot.
pub trait StorageBackend: Send + fmt::Debug {
    /// Which variant this backend is.
    fn kind(&self) -> BackendKind;

    /// Directory the backend was opened against.
    fn root(&self) -> &Path;

    /// Returns `true` once the backend has been released.
    fn is_closed(&self) -> bool;

    /// Releases the backend.
    ///
    /// # Errors
    ///
    /// Returns [`TasksDbError::Io`] if a filesystem resource could not be
    /// released. A failed release still marks the backend closed.
    fn close(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!("TINY".parse::<BackendKind>().unwrap(), BackendKind::Tiny);
        assert_eq!(" memory ".parse::<BackendKind>().unwrap(), BackendKind::Memory);
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let err = "mongo".parse::<BackendKind>().unwrap_err();
        assert!(matches!(err, TasksDbError::UnknownBackend(ref name) if name == "mongo"));
        assert!("".parse::<BackendKind>().is_err());
    }

    #[test]
    fn display_matches_serde() {
        for kind in [BackendKind::Tiny, BackendKind::Memory] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.to_string());
            let back: BackendKind = serde_json::from_value(json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn open_dispatches_on_kind() {
        let dir = tempfile::tempdir().unwrap();
        for kind in [BackendKind::Tiny, BackendKind::Memory] {
            let mut backend = kind.open(dir.path()).unwrap();
            assert_eq!(backend.kind(), kind);
            assert_eq!(backend.root(), dir.path());
            backend.close().unwrap();
            assert!(backend.is_closed());
        }
    }
}
