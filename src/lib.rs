//! Task record type and tasks database lifecycle.
//!
//! This crate provides the immutable [`Task`] value type and the plumbing
//! for acquiring and releasing a tasks database handle around a unit of
//! work, typically a single test.
//!
//! # Overview
//!
//! A [`Task`] holds four fields (`summary`, `owner`, `done`, `id`), all of
//! which default sensibly, so a record can be built from any prefix of its
//! positional values:
//!
//! ```
//! use tasks::Task;
//!
//! let t = Task::from(("buy oat milk", "brian"));
//! assert_eq!(t.summary(), Some("buy oat milk"));
//! assert_eq!(t.owner(), Some("brian"));
//! assert_eq!((t.done(), t.id()), (false, None));
//! ```
//!
//! A [`TasksDb`] is a handle to a storage backend selected by
//! [`BackendKind`] and rooted at a directory. Dropping the handle releases
//! the backend, so the release happens on every exit path.
//!
//! # Module Organization
//!
//! - [`types`] - The [`Task`] record
//! - [`store`] - Backend kinds and the [`StorageBackend`] trait
//! - [`db`] - The [`TasksDb`] handle and the process-wide session
//! - [`config`] - TOML-backed [`DbConfig`]
//! - [`error`] - [`TasksDbError`] and the crate [`Result`] alias

pub mod config;
pub mod db;
pub mod error;
#[cfg(feature = "logging")]
pub mod logging;
pub mod store;
pub mod types;

// Re-exports for ergonomic access
pub use config::DbConfig;
pub use db::{
    active_tasks_db_root, is_tasks_db_started, start_tasks_db, stop_tasks_db, TasksDb,
};
pub use error::{Result, TasksDbError};
#[cfg(feature = "logging")]
pub use logging::{init_logging, init_test_logging};
pub use store::{BackendKind, StorageBackend};
pub use types::Task;
