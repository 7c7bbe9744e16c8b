pub mod config;
mod csv_utils;
pub mod dto;
mod engine;
mod error;
pub mod http;
mod runner;
mod state;
mod stores;

pub use config::Config;
pub use dto::Transaction;
pub use engine::{Engine, DEFAULT_MAX_DEPTH};
pub use error::Error;
pub use runner::{import, import_async};
pub use state::SharedEngine;
