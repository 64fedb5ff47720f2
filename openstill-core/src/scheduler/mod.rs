//! Periodic task scheduling
//!
//! Tasks report how long until they want to run next; the runner keeps a
//! monotonic deadline per task and runs those that are due and triggered.

pub mod runner;
pub mod task;

pub use runner::{RunnerError, TaskRunner};
pub use task::{millis_to_micros, PeriodicTask};
