//! Domain-specific errors for the transaction store.
//!
//! Contains error variants for:
//! - Lookups of transactions that were never stored
//! - Subtree traversals aborted on a cyclic or too deep parent chain
//! - Subtree sums that overflow the float range
//! - Requests rejected before reaching the store
//!
//! I/O and CSV failures during bulk import are not modelled here; the
//! runners report them as boxed errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("no such transaction: {0}")]
    TransactionNotFound(i64),

    #[error("cycle detected at transaction {0}")]
    CycleDetected(i64),

    #[error("subtree deeper than {limit} levels")]
    DepthExceeded { limit: usize },

    #[error("subtree sum of transaction {0} is not a finite number")]
    NonFiniteSum(i64),

    #[error("malformed input: {0}")]
    MalformedInput(String),
}
