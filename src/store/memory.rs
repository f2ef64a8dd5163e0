//! In-process backend.

use std::path::{Path, PathBuf};

use crate::error::Result;

use super::{BackendKind, StorageBackend};

/// Backend that lives entirely in process memory.
///
/// The root is recorded for reporting only; it does not need to exist and is
/// never read or written. Any number of memory backends may share a root.
///
/// # Examples
///
/// ```
/// use tasks::store::{MemoryBackend, StorageBackend};
///
/// let mut backend = MemoryBackend::open("/not/on/disk");
/// assert!(!backend.is_closed());
/// backend.close().unwrap();
/// assert!(backend.is_closed());
/// ```
#[derive(Debug)]
pub struct MemoryBackend {
    root: PathBuf,
    closed: bool,
}

impl MemoryBackend {
    /// Opens a memory backend. Never fails.
    pub fn open(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            closed: false,
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Memory
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_backends_can_share_a_root() {
        let mut a = MemoryBackend::open("/shared");
        let mut b = MemoryBackend::open("/shared");
        assert_eq!(a.root(), b.root());
        a.close().unwrap();
        b.close().unwrap();
    }

    #[test]
    fn open_does_not_touch_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let _backend = MemoryBackend::open(dir.path());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
