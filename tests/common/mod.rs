//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::Path;

use rstest::fixture;
use tasks::{BackendKind, TasksDb};
use tempfile::TempDir;

/// An open tiny database in a fresh temporary directory.
///
/// Field order matters: the database is released before the directory is
/// removed.
pub struct TasksDbFixture {
    db: TasksDb,
    dir: TempDir,
}

impl TasksDbFixture {
    pub fn db(&self) -> &TasksDb {
        &self.db
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// Connects to a tasks database before the test and disconnects after.
#[fixture]
pub fn tasks_db() -> TasksDbFixture {
    #[cfg(feature = "logging")]
    tasks::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let db = TasksDb::open(dir.path(), BackendKind::Tiny).unwrap();
    TasksDbFixture { db, dir }
}
