//! Shared, concurrently accessible handle to the [`Engine`].
//!
//! One reader/writer lock guards all indexes at once: upserts take it
//! exclusively, and every read holds it for the whole operation so a
//! subtree sum never observes a half-applied upsert.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{Engine, Error, Transaction};

#[derive(Clone, Default)]
pub struct SharedEngine {
    inner: Arc<RwLock<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    pub async fn upsert(&self, transaction: Transaction) -> Option<Transaction> {
        self.inner.write().await.upsert(transaction)
    }

    pub async fn get(&self, id: i64) -> Result<Transaction, Error> {
        self.inner.read().await.get(id).cloned()
    }

    pub async fn list_by_type(&self, tx_type: &str) -> Vec<i64> {
        self.inner.read().await.list_by_type(tx_type)
    }

    pub async fn sum_subtree(&self, id: i64) -> Result<f64, Error> {
        self.inner.read().await.sum_subtree(id)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shared_round_trip() {
        let engine = SharedEngine::default();
        let transaction = Transaction::new(1, 42.0, "food", None);
        engine.upsert(transaction.clone()).await;

        assert_eq!(engine.get(1).await, Ok(transaction));
        assert_eq!(engine.get(2).await, Err(Error::TransactionNotFound(2)));
        assert_eq!(engine.list_by_type("food").await, vec![1]);
        assert_eq!(engine.sum_subtree(1).await, Ok(42.0));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let engine = SharedEngine::default();
        let other = engine.clone();
        other.upsert(Transaction::new(1, 1.0, "a", None)).await;

        assert_eq!(engine.len().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_upserts_are_not_lost() {
        let engine = SharedEngine::new(Engine::new());

        let handles: Vec<_> = (0..8i64)
            .map(|worker| {
                let engine = engine.clone();
                tokio::spawn(async move {
                    for i in 0..250i64 {
                        let id = worker * 1000 + i;
                        let parent = if i == 0 { None } else { Some(id - 1) };
                        engine
                            .upsert(Transaction::new(id, 1.0, format!("worker-{worker}"), parent))
                            .await;
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(engine.len().await, 2000);
        for worker in 0..8i64 {
            let ids = engine.list_by_type(&format!("worker-{worker}")).await;
            assert_eq!(ids.len(), 250);
            assert_eq!(engine.sum_subtree(worker * 1000).await, Ok(250.0));
            for i in 0..250i64 {
                assert!(engine.get(worker * 1000 + i).await.is_ok());
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_sums_during_writes_see_whole_upserts() {
        let engine = SharedEngine::default();
        engine.upsert(Transaction::new(0, 0.0, "root", None)).await;

        let writer = {
            let engine = engine.clone();
            tokio::spawn(async move {
                for id in 1..=500i64 {
                    engine.upsert(Transaction::new(id, 1.0, "leaf", Some(0))).await;
                }
            })
        };

        let mut last = 0.0;
        while !writer.is_finished() {
            let sum = engine.sum_subtree(0).await.unwrap();
            assert_eq!(sum.fract(), 0.0);
            assert!(sum >= last);
            last = sum;
            tokio::task::yield_now().await;
        }
        writer.await.unwrap();

        assert_eq!(engine.sum_subtree(0).await, Ok(500.0));
    }
}
