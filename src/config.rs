//! Service configuration, from command-line flags or the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::engine::DEFAULT_MAX_DEPTH;

/// In-memory transaction service
#[derive(Debug, Parser)]
#[command(name = "transaction-service", version, about, long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "TRANSACTION_SERVICE_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Deepest parent chain a subtree sum follows before failing
    #[arg(long, env = "TRANSACTION_SERVICE_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// CSV file of transactions to import at startup
    #[arg(long, env = "TRANSACTION_SERVICE_SEED")]
    pub seed: Option<PathBuf>,
}
