//! Storage layer for the transaction service. Provides storage for:
//! - Transaction records grouped by type label ([`TransactionsStore`])
//! - The parent/child relation between transactions ([`ChildrenIndex`])
//!
//! Neither store synchronizes access; the engine composes them and the
//! shared handle guards the engine as a whole.

mod children;
mod transactions;

pub use children::ChildrenIndex;
pub use transactions::TransactionsStore;
