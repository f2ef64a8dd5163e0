//! Directory-rooted lightweight backend.
//!
//! [`TinyBackend`] claims its root directory with a lock marker,
//! [`LOCK_FILE_NAME`], holding the owning process id. A second `open` on
//! the same directory fails with [`TasksDbError::AlreadyOpen`] while that
//! process is alive.
//!
//! # Marker Protocol
//!
//! The pid is written to a private staging file first and then hard-linked
//! to the marker name. Linking fails if the marker exists, so a marker is
//! either absent or complete; a crash mid-write leaves only a staging file,
//! which is removed on the error path.
//!
//! A marker whose pid is not a running process, or whose contents do not
//! parse, is stale: its owner exited without releasing it. `open` removes a
//! stale marker and claims the root.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::error::{Result, TasksDbError};

use super::{BackendKind, StorageBackend};

/// Name of the marker file created inside an open tiny database's root.
pub const LOCK_FILE_NAME: &str = ".tasks_db.lock";

static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

/// Lightweight backend rooted at an existing directory.
///
/// # Examples
///
/// ```
/// use tasks::store::{StorageBackend, TinyBackend};
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut backend = TinyBackend::open(dir.path()).unwrap();
/// assert!(backend.lock_path().exists());
///
/// backend.close().unwrap();
/// assert!(!backend.lock_path().exists());
/// ```
#[derive(Debug)]
pub struct TinyBackend {
    root: PathBuf,
    lock_path: PathBuf,
    closed: bool,
}

impl TinyBackend {
    /// Opens the backend, claiming `root`.
    ///
    /// # Errors
    ///
    /// - [`TasksDbError::InvalidPath`] if `root` is not an existing directory.
    /// - [`TasksDbError::AlreadyOpen`] if a live process holds `root`.
    /// - [`TasksDbError::Io`] if the lock marker cannot be written or a
    ///   stale one cannot be removed.
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(TasksDbError::InvalidPath {
                path: root.to_path_buf(),
            });
        }

        let lock_path = root.join(LOCK_FILE_NAME);
        if !write_marker(root, &lock_path)? {
            let holder = fs::read_to_string(&lock_path).ok();
            if !is_stale(holder.as_deref()) {
                return Err(TasksDbError::AlreadyOpen {
                    path: root.to_path_buf(),
                });
            }

            tracing::warn!(
                lock = %lock_path.display(),
                holder = holder.as_deref().map_or("", str::trim),
                "reclaiming stale tasks database lock"
            );
            match fs::remove_file(&lock_path) {
                Ok(()) => {},
                Err(e) if e.kind() == io::ErrorKind::NotFound => {},
                Err(e) => return Err(TasksDbError::io(&lock_path, e)),
            }

            // Lost the race to another reclaimer.
            if !write_marker(root, &lock_path)? {
                return Err(TasksDbError::AlreadyOpen {
                    path: root.to_path_buf(),
                });
            }
        }

        tracing::debug!(root = %root.display(), "claimed tiny database root");

        Ok(Self {
            root: root.to_path_buf(),
            lock_path,
            closed: false,
        })
    }

    /// Location of the lock marker.
    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }
}

/// Atomically publishes a marker holding this process id.
///
/// Returns `Ok(false)` if a marker already exists.
fn write_marker(root: &Path, lock_path: &Path) -> Result<bool> {
    let staging = root.join(format!(
        "{LOCK_FILE_NAME}.{}.{}",
        std::process::id(),
        STAGING_SEQ.fetch_add(1, Ordering::Relaxed)
    ));

    let published = stage_and_link(&staging, lock_path);
    if let Err(e) = fs::remove_file(&staging) {
        if e.kind() != io::ErrorKind::NotFound {
            tracing::debug!(staging = %staging.display(), error = %e, "staging file left behind");
        }
    }
    published
}

fn stage_and_link(staging: &Path, lock_path: &Path) -> Result<bool> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(staging)
        .map_err(|e| TasksDbError::io(staging, e))?;
    writeln!(file, "{}", std::process::id()).map_err(|e| TasksDbError::io(staging, e))?;
    file.sync_all().map_err(|e| TasksDbError::io(staging, e))?;
    drop(file);

    match fs::hard_link(staging, lock_path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(TasksDbError::io(lock_path, e)),
    }
}

/// A marker is stale when it names no running process other than this one.
///
/// A marker naming this process belongs to a live handle here, or to a
/// session this process never stopped; either way it is not reclaimed.
fn is_stale(contents: Option<&str>) -> bool {
    let Some(pid) = contents.and_then(|c| c.trim().parse::<u32>().ok()) else {
        return true;
    };
    if pid == std::process::id() {
        return false;
    }
    !process_is_alive(pid)
}

fn process_is_alive(pid: u32) -> bool {
    let pid = Pid::from_u32(pid);
    let mut system = System::new();
    let _ = system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    system.process(pid).is_some()
}

impl StorageBackend for TinyBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Tiny
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        match fs::remove_file(&self.lock_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    lock = %self.lock_path.display(),
                    "lock marker already gone"
                );
                Ok(())
            },
            Err(e) => Err(TasksDbError::io(&self.lock_path, e)),
        }
    }
}
