//! Value types shared by the tasks crate.

pub mod task;

pub use task::Task;
