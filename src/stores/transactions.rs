//! Transaction record storage, bucketed by type label.
//!
//! Maintains two maps that are always written together:
//! - id to type label, to find a record's bucket
//! - type label to the bucket of records carrying that label

use std::collections::HashMap;

use crate::{Error, Transaction};

#[derive(Debug, Default)]
pub struct TransactionsStore {
    /// Type label of every stored transaction
    by_id: HashMap<i64, String>,
    /// Primary storage of the records, bucketed by type. Buckets are created lazily
    by_type: HashMap<String, HashMap<i64, Transaction>>,
}

impl TransactionsStore {
    pub fn new() -> Self {
        Self {
            by_id: HashMap::new(),
            by_type: HashMap::new(),
        }
    }

    /// Stores a transaction, replacing any record with the same id.
    /// Returns the replaced record, if there was one.
    pub fn insert(&mut self, transaction: Transaction) -> Option<Transaction> {
        let id = transaction.transaction_id;
        let previous = self.remove(id);

        self.by_id.insert(id, transaction.tx_type.clone());
        self.by_type
            .entry(transaction.tx_type.clone())
            .or_default()
            .insert(id, transaction);
        previous
    }

    /// Gets a stored transaction, or returns an error if it doesn't exist.
    pub fn get(&self, id: i64) -> Result<&Transaction, Error> {
        self.by_id
            .get(&id)
            .and_then(|tx_type| self.by_type.get(tx_type))
            .and_then(|bucket| bucket.get(&id))
            .ok_or(Error::TransactionNotFound(id))
    }

    /// Ids of all transactions carrying the type label, in ascending order.
    /// An unknown type yields an empty list.
    pub fn ids_of_type(&self, tx_type: &str) -> Vec<i64> {
        let mut ids: Vec<i64> = self
            .by_type
            .get(tx_type)
            .map(|bucket| bucket.keys().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    fn remove(&mut self, id: i64) -> Option<Transaction> {
        let tx_type = self.by_id.remove(&id)?;
        let bucket = self.by_type.get_mut(&tx_type)?;
        let removed = bucket.remove(&id);
        if bucket.is_empty() {
            self.by_type.remove(&tx_type);
        }
        removed
    }
}
