//! Navigation task
//!
//! Queued command front-end around the core navigation controller.

pub mod task;

pub use task::{NavCommand, NavStatus, NavigationTask, TaskError, COMMAND_QUEUE_SIZE};
