//! Per-item-code mutual exclusion for stock read-modify-write sequences

use std::collections::HashMap;
use std::sync::{Arc, Mutex as TableMutex, PoisonError};

use tokio::sync::{Mutex, OwnedMutexGuard};

type KeyTable = Arc<TableMutex<HashMap<String, Arc<Mutex<()>>>>>;

/// Serializes stock mutations per item code.
///
/// Cloning shares the same lock table. Scope is one process. An entry lives
/// only while some task holds or waits on it.
#[derive(Clone, Default)]
pub struct StockLocks {
    keys: KeyTable,
}

/// Held locks; released on drop
pub struct StockGuard {
    keys: KeyTable,
    held: Vec<(String, OwnedMutexGuard<()>)>,
}

impl Drop for StockGuard {
    fn drop(&mut self) {
        let codes: Vec<String> = self.held.drain(..).map(|(code, _guard)| code).collect();

        let mut keys = self.keys.lock().unwrap_or_else(PoisonError::into_inner);
        for code in codes {
            if keys.get(&code).is_some_and(|lock| Arc::strong_count(lock) == 1) {
                keys.remove(&code);
            }
        }
    }
}

impl StockLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn key_lock(&self, item_code: &str) -> Arc<Mutex<()>> {
        let mut keys = self.keys.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            keys.entry(item_code.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    /// Lock a single item code
    pub async fn acquire(&self, item_code: &str) -> StockGuard {
        self.acquire_many(&[item_code]).await
    }

    /// Lock several item codes, always in sorted order
    pub async fn acquire_many(&self, item_codes: &[&str]) -> StockGuard {
        let mut codes = item_codes.to_vec();
        codes.sort_unstable();
        codes.dedup();

        let mut held = Vec::with_capacity(codes.len());
        for code in codes {
            let lock = self.key_lock(code);
            held.push((code.to_string(), lock.lock_owned().await));
        }
        StockGuard {
            keys: Arc::clone(&self.keys),
            held,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn tracked(locks: &StockLocks) -> usize {
        locks.keys.lock().unwrap().len()
    }

    #[tokio::test]
    async fn test_same_code_is_exclusive() {
        let locks = StockLocks::new();
        let guard = locks.acquire("ITEM001").await;

        let contended = tokio::time::timeout(Duration::from_millis(20), locks.acquire("ITEM001")).await;
        assert!(contended.is_err());

        drop(guard);
        let reacquired = tokio::time::timeout(Duration::from_millis(20), locks.acquire("ITEM001")).await;
        assert!(reacquired.is_ok());
    }

    #[tokio::test]
    async fn test_other_codes_are_independent() {
        let locks = StockLocks::new();
        let _guard = locks.acquire("ITEM001").await;

        let other = tokio::time::timeout(Duration::from_millis(20), locks.acquire("ITEM002")).await;
        assert!(other.is_ok());
    }

    #[tokio::test]
    async fn test_acquire_many_dedups_codes() {
        let locks = StockLocks::new();
        let guard = tokio::time::timeout(
            Duration::from_millis(20),
            locks.acquire_many(&["ITEM002", "ITEM001", "ITEM002"]),
        )
        .await
        .unwrap();
        assert_eq!(guard.held.len(), 2);
        assert_eq!(guard.held[0].0, "ITEM001");
    }

    #[tokio::test]
    async fn test_released_codes_are_pruned() {
        let locks = StockLocks::new();
        for n in 0..50 {
            let _guard = locks.acquire(&format!("ITEM{:03}", n)).await;
        }
        assert_eq!(tracked(&locks), 0);

        let first = locks.acquire_many(&["ITEM001", "ITEM002"]).await;
        assert_eq!(tracked(&locks), 2);
        drop(first);
        assert_eq!(tracked(&locks), 0);
    }

    #[tokio::test]
    async fn test_waiting_task_keeps_entry_alive() {
        let locks = StockLocks::new();
        let guard = locks.acquire("ITEM001").await;

        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire("ITEM001").await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        drop(guard);
        assert!(tracked(&locks) <= 1);
        tokio::time::timeout(Duration::from_millis(200), waiter)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(tracked(&locks), 0);

        let again = tokio::time::timeout(Duration::from_millis(20), locks.acquire("ITEM001")).await;
        assert!(again.is_ok());
    }
}
