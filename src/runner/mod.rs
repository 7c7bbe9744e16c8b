//! The runner is responsible for bulk-loading transactions from a CSV file
//! into the store, e.g. to seed the service at startup.
//!
//! This module provides both a synchronous and an asynchronous runner implementations.
//!
mod async_runner;
mod sync_runner;

pub use async_runner::import as import_async;
pub use sync_runner::import;
