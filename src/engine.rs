use std::collections::HashSet;

use tracing::{debug, warn};

use crate::stores::{ChildrenIndex, TransactionsStore};
use crate::{Error, Transaction};

/// Deepest parent chain a subtree sum will follow before giving up.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// The transaction store: records bucketed by type plus the parent/child
/// relation, kept consistent with each other on every upsert.
#[derive(Debug)]
pub struct Engine {
    transactions: TransactionsStore,
    children: ChildrenIndex,
    max_depth: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            transactions: TransactionsStore::new(),
            children: ChildrenIndex::new(),
            max_depth,
        }
    }

    /// Creates or replaces a transaction. Returns the replaced record, if any.
    ///
    /// When the replaced record declared a different parent, the id is
    /// removed from that parent's children, so a transaction is only ever
    /// counted under the parent it currently declares.
    pub fn upsert(&mut self, transaction: Transaction) -> Option<Transaction> {
        let id = transaction.transaction_id;
        let parent = transaction.parent();

        let previous = self.transactions.insert(transaction);
        if let Some(old_parent) = previous.as_ref().and_then(Transaction::parent) {
            if parent != Some(old_parent) {
                debug!(id, old_parent, new_parent = ?parent, "transaction re-parented");
                self.children.unlink(old_parent, id);
            }
        }
        if let Some(parent) = parent {
            self.children.link(parent, id);
        }

        debug!(id, ?parent, replaced = previous.is_some(), "transaction stored");
        previous
    }

    pub fn get(&self, id: i64) -> Result<&Transaction, Error> {
        self.transactions.get(id)
    }

    /// Ids stored under the type label in ascending order; empty for an unknown type.
    pub fn list_by_type(&self, tx_type: &str) -> Vec<i64> {
        self.transactions.ids_of_type(tx_type)
    }

    /// Sums the amount of `id` and of every transaction below it.
    ///
    /// An id without a record contributes 0 while its recorded children still
    /// count. The traversal fails instead of looping when it meets an id it
    /// has already visited, or when the chain gets deeper than the configured
    /// maximum. A total outside the finite float range is an error too.
    pub fn sum_subtree(&self, id: i64) -> Result<f64, Error> {
        let mut sum = 0.0;
        let mut visited = HashSet::new();
        let mut stack = vec![(id, 0usize)];

        while let Some((current, depth)) = stack.pop() {
            if depth > self.max_depth {
                warn!(root = id, limit = self.max_depth, "subtree sum exceeded depth limit");
                return Err(Error::DepthExceeded {
                    limit: self.max_depth,
                });
            }
            if !visited.insert(current) {
                warn!(root = id, revisited = current, "cycle in parent chain");
                return Err(Error::CycleDetected(current));
            }

            if let Ok(transaction) = self.transactions.get(current) {
                sum += transaction.amount;
            }
            stack.extend(self.children.children_of(current).map(|child| (child, depth + 1)));
        }

        if !sum.is_finite() {
            warn!(root = id, "subtree sum is not finite");
            return Err(Error::NonFiniteSum(id));
        }
        Ok(sum)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
