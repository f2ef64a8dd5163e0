//! Tasks database handle and the process-wide session.
//!
//! [`TasksDb`] is the scoped handle: opening it acquires a backend, and the
//! backend is released exactly once, either by [`TasksDb::close`] or when the
//! handle is dropped. Dropping covers early returns, `?` propagation, and
//! unwinding out of a failed assertion.
//!
//! [`start_tasks_db`] and [`stop_tasks_db`] keep a single implicit handle in
//! a process-wide slot for callers that do not want to thread a handle
//! through their code.
//!
//! # Examples
//!
//! ```
//! use tasks::{BackendKind, TasksDb};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let db = TasksDb::open(dir.path(), BackendKind::Tiny).unwrap();
//! assert_eq!(db.kind(), BackendKind::Tiny);
//! db.close().unwrap();
//! ```

use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::{Result, TasksDbError};
use crate::store::{BackendKind, StorageBackend};

/// An open tasks database.
///
/// The handle exclusively owns its backend. It is not `Clone`; share it by
/// reference for the duration of the work it scopes.
#[derive(Debug)]
pub struct TasksDb {
    backend: Box<dyn StorageBackend>,
}

impl TasksDb {
    /// Opens a database of `kind` rooted at `root`.
    ///
    /// # Errors
    ///
    /// - [`TasksDbError::InvalidPath`] if a `tiny` root is not an existing
    ///   directory.
    /// - [`TasksDbError::AlreadyOpen`] if another handle holds a `tiny` root.
    /// - [`TasksDbError::Io`] if the backend could not be acquired.
    pub fn open(root: impl AsRef<Path>, kind: BackendKind) -> Result<Self> {
        let root = root.as_ref();
        let backend = kind.open(root)?;
        tracing::info!(kind = %kind, root = %root.display(), "opened tasks database");
        Ok(Self { backend })
    }

    /// Opens a database whose kind is given by name (`"tiny"`, `"memory"`).
    ///
    /// # Errors
    ///
    /// [`TasksDbError::UnknownBackend`] for an unrecognized name, otherwise
    /// the same errors as [`open`](Self::open).
    ///
    /// # Examples
    ///
    /// ```
    /// use tasks::{TasksDb, TasksDbError};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let db = TasksDb::open_named(dir.path(), "tiny").unwrap();
    /// db.close().unwrap();
    ///
    /// let err = TasksDb::open_named(dir.path(), "mongo").unwrap_err();
    /// assert!(matches!(err, TasksDbError::UnknownBackend(_)));
    /// ```
    pub fn open_named(root: impl AsRef<Path>, kind: &str) -> Result<Self> {
        Self::open(root, kind.parse()?)
    }

    /// Opens a database, runs `f` against it, and closes it.
    ///
    /// The backend is released even if `f` panics. Close errors are
    /// reported only when `f` returned normally.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasks::{BackendKind, TasksDb};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let kind = TasksDb::scoped(dir.path(), BackendKind::Tiny, |db| db.kind()).unwrap();
    /// assert_eq!(kind, BackendKind::Tiny);
    ///
    /// // The root is free again once the scope ends.
    /// TasksDb::open(dir.path(), BackendKind::Tiny).unwrap().close().unwrap();
    /// ```
    pub fn scoped<T, F>(root: impl AsRef<Path>, kind: BackendKind, f: F) -> Result<T>
    where
        F: FnOnce(&TasksDb) -> T,
    {
        let db = Self::open(root, kind)?;
        let out = f(&db);
        db.close()?;
        Ok(out)
    }

    /// Backend variant this handle was opened with.
    pub fn kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Root directory this handle was opened against.
    pub fn root(&self) -> &Path {
        self.backend.root()
    }

    /// Releases the backend.
    ///
    /// # Errors
    ///
    /// [`TasksDbError::Io`] if a filesystem resource could not be released.
    pub fn close(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        if self.backend.is_closed() {
            return Ok(());
        }
        let result = self.backend.close();
        tracing::info!(
            kind = %self.backend.kind(),
            root = %self.backend.root().display(),
            ok = result.is_ok(),
            "closed tasks database"
        );
        result
    }
}

impl Drop for TasksDb {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            tracing::warn!(error = %e, "failed to release tasks database on drop");
        }
    }
}

// ---- Process-wide session ----

static ACTIVE_DB: Mutex<Option<TasksDb>> = parking_lot::const_mutex(None);

/// Opens a database and makes it the process-wide session.
///
/// # Errors
///
/// - [`TasksDbError::AlreadyStarted`] if a session is already running; the
///   running session is left untouched.
/// - Any error from [`TasksDb::open_named`].
///
/// # Examples
///
/// ```
/// let dir = tempfile::tempdir().unwrap();
/// tasks::start_tasks_db(dir.path(), "tiny").unwrap();
/// assert!(tasks::is_tasks_db_started());
/// tasks::stop_tasks_db().unwrap();
/// assert!(!tasks::is_tasks_db_started());
/// ```
pub fn start_tasks_db(root: impl AsRef<Path>, kind: &str) -> Result<()> {
    let mut slot = ACTIVE_DB.lock();
    if let Some(active) = slot.as_ref() {
        return Err(TasksDbError::AlreadyStarted {
            path: active.root().to_path_buf(),
        });
    }
    *slot = Some(TasksDb::open_named(root, kind)?);
    Ok(())
}

/// Closes the process-wide session, if any.
///
/// Stopping when nothing is started is a no-op.
///
/// # Errors
///
/// [`TasksDbError::Io`] if the session's backend could not be released. The
/// session is cleared either way.
pub fn stop_tasks_db() -> Result<()> {
    let active = ACTIVE_DB.lock().take();
    match active {
        Some(db) => db.close(),
        None => {
            tracing::debug!("stop_tasks_db called with no active session");
            Ok(())
        },
    }
}

/// Returns `true` while a process-wide session is running.
pub fn is_tasks_db_started() -> bool {
    ACTIVE_DB.lock().is_some()
}

/// Root of the running process-wide session.
pub fn active_tasks_db_root() -> Option<PathBuf> {
    ACTIVE_DB.lock().as_ref().map(|db| db.root().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tiny::LOCK_FILE_NAME;

    #[test]
    fn drop_releases_tiny_backend() {
        let dir = tempfile::tempdir().unwrap();
        let lock = dir.path().join(LOCK_FILE_NAME);
        {
            let _db = TasksDb::open(dir.path(), BackendKind::Tiny).unwrap();
            assert!(lock.exists());
        }
        assert!(!lock.exists());
    }

    #[test]
    fn close_then_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db = TasksDb::open(dir.path(), BackendKind::Tiny).unwrap();
        db.close().unwrap();
        let db = TasksDb::open(dir.path(), BackendKind::Tiny).unwrap();
        assert_eq!(db.root(), dir.path());
    }

    #[test]
    fn scoped_releases_after_panic() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();

        let outcome = std::panic::catch_unwind(|| {
            TasksDb::scoped(&root, BackendKind::Tiny, |_db| {
                panic!("assertion inside test body failed");
            })
        });
        assert!(outcome.is_err());
        assert!(!root.join(LOCK_FILE_NAME).exists());
    }

    #[test]
    fn scoped_propagates_open_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let result = TasksDb::scoped(&missing, BackendKind::Tiny, |_| ());
        assert!(matches!(result, Err(TasksDbError::InvalidPath { .. })));
    }
}
