//! Per-case write serialization
//!
//! The engagement record is a read-modify-write document with no store-side
//! transaction to protect it. Within a process, all engagement mutations
//! for a case run under that case's async mutex; the version-conditional
//! write in the port contract covers writers in other processes.

use std::collections::HashMap;
use std::sync::Arc;

use core_kernel::CaseId;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry handing out one async mutex per case id
///
/// Locks are created on demand and kept for the registry's lifetime; a
/// case id is 16 bytes and the set of active cases is small relative to
/// memory.
#[derive(Debug, Default)]
pub struct CaseLockRegistry {
    locks: Mutex<HashMap<CaseId, Arc<Mutex<()>>>>,
}

impl CaseLockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the write lock for a case, waiting if another writer holds it
    pub async fn acquire(&self, case_id: CaseId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(case_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_same_case_serializes() {
        let registry = Arc::new(CaseLockRegistry::new());
        let case_id = CaseId::new();
        let counter = Arc::new(AtomicU32::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let registry = registry.clone();
            let counter = counter.clone();
            handles.push(tokio::spawn(async move {
                let _guard = registry.acquire(case_id).await;
                let before = counter.fetch_add(1, Ordering::SeqCst);
                // Nobody else may be inside the critical section
                assert_eq!(counter.load(Ordering::SeqCst), before + 1);
                tokio::task::yield_now().await;
                counter.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_different_cases_do_not_block() {
        let registry = CaseLockRegistry::new();
        let _a = registry.acquire(CaseId::new()).await;
        // Acquiring a different case's lock must not deadlock
        let _b = registry.acquire(CaseId::new()).await;
    }
}
