//! Named mutexes serializing read-modify-write sequences on shared parents
//!
//! Several resources are children of the same remote document (rules of a firewall
//! policy, peerings of an express route circuit): concurrent writes would overwrite
//! each other. Each write section holds the lock named after the parent for its whole
//! duration.

use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex},
};

use tokio::sync::OwnedMutexGuard;

/// Registry of named locks
///
/// Locks are keyed by a type tag and a name, so unrelated kinds of resources sharing a
/// name never contend. Entries are created on first use and live as long as the registry.
#[derive(Debug, Default)]
pub struct NamedLocks {
    locks: Mutex<HashMap<LockKey, Arc<tokio::sync::Mutex<()>>>>,
}

/// `(type_tag, name)`
pub type LockKey = (String, String);

/// Lock held on a named entry, released on drop
#[derive(Debug)]
pub struct NamedLockGuard {
    key: LockKey,
    _guard: OwnedMutexGuard<()>,
}

impl NamedLockGuard {
    pub fn key(&self) -> &LockKey {
        &self.key
    }
}

impl Drop for NamedLockGuard {
    fn drop(&mut self) {
        tracing::debug!(type_tag = %self.key.0, name = %self.key.1, "released lock");
    }
}

/// Locks taken by [`NamedLocks::acquire_all`], released last-acquired first
#[derive(Debug, Default)]
pub struct NamedLockSet {
    guards: Vec<NamedLockGuard>,
}

impl NamedLockSet {
    /// Release every lock, children before parents, and return the released keys
    pub fn release(&mut self) -> Vec<LockKey> {
        let mut released = Vec::with_capacity(self.guards.len());
        while let Some(guard) = self.guards.pop() {
            released.push(guard.key().clone());
            drop(guard);
        }
        released
    }
}

impl Drop for NamedLockSet {
    fn drop(&mut self) {
        self.release();
    }
}

impl NamedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, key: &LockKey) -> Arc<tokio::sync::Mutex<()>> {
        // A poisoned map is still consistent: entries are only ever inserted.
        let mut locks = match self.locks.lock() {
            Ok(locks) => locks,
            Err(poisoned) => poisoned.into_inner(),
        };
        locks.entry(key.clone()).or_default().clone()
    }

    /// Wait until the lock `(name, type_tag)` is free and take it
    ///
    /// Not re-entrant: acquiring twice the same key from the same flow deadlocks.
    pub async fn acquire(&self, name: &str, type_tag: &str) -> NamedLockGuard {
        let key = (type_tag.to_owned(), name.to_owned());
        let mutex = self.entry(&key);
        tracing::debug!(type_tag, name, "acquiring lock");
        let guard = mutex.lock_owned().await;
        tracing::debug!(type_tag, name, "acquired lock");
        NamedLockGuard { key, _guard: guard }
    }

    /// Run `fut` while holding the lock `(name, type_tag)`
    pub async fn with_lock<F: Future>(&self, name: &str, type_tag: &str, fut: F) -> F::Output {
        let _guard = self.acquire(name, type_tag).await;
        fut.await
    }

    /// Take several locks in order, parents first
    ///
    /// Dropping the returned set releases them in reverse order.
    pub async fn acquire_all(&self, keys: &[(String, &'static str)]) -> NamedLockSet {
        let mut set = NamedLockSet {
            guards: Vec::with_capacity(keys.len()),
        };
        for (name, type_tag) in keys {
            set.guards.push(self.acquire(name, type_tag).await);
        }
        set
    }

    /// Run `fut` while holding all the locks in `keys`
    pub async fn with_locks<F: Future>(
        &self,
        keys: &[(String, &'static str)],
        fut: F,
    ) -> F::Output {
        let _guards = self.acquire_all(keys).await;
        fut.await
    }

    /// Number of distinct locks ever taken
    pub fn len(&self) -> usize {
        match self.locks.lock() {
            Ok(locks) => locks.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use rand::Rng;

    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn exclusive_under_contention() {
        let locks = Arc::new(NamedLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..32)
            .map(|_| {
                let locks = locks.clone();
                let inside = inside.clone();
                let peak = peak.clone();
                let jitter = rand::thread_rng().gen_range(0..3);
                tokio::spawn(async move {
                    locks
                        .with_lock("policy1", "azurerm_firewall_policy", async {
                            let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                            peak.fetch_max(now, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(jitter)).await;
                            inside.fetch_sub(1, Ordering::SeqCst);
                        })
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(peak.load(Ordering::SeqCst), 1);
        assert_eq!(locks.len(), 1);
    }

    #[tokio::test]
    async fn type_tag_separates_keys() {
        let locks = NamedLocks::new();
        let _a = locks.acquire("shared", "azurerm_firewall_policy").await;
        // Would deadlock if the tags collided
        let _b = locks.acquire("shared", "azurerm_express_route_circuit").await;
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn released_on_error_path() {
        let locks = NamedLocks::new();
        let res: Result<(), &str> = locks
            .with_lock("circuit", "azurerm_express_route_circuit", async { Err("boom") })
            .await;
        assert!(res.is_err());
        let guard = tokio::time::timeout(
            Duration::from_secs(1),
            locks.acquire("circuit", "azurerm_express_route_circuit"),
        )
        .await;
        assert!(guard.is_ok());
    }

    #[tokio::test]
    async fn abandoned_wait_does_not_leak() {
        let locks = Arc::new(NamedLocks::new());
        let held = locks.acquire("gw", "azurerm_application_gateway").await;

        let waiting = tokio::time::timeout(
            Duration::from_millis(20),
            locks.acquire("gw", "azurerm_application_gateway"),
        )
        .await;
        assert!(waiting.is_err());

        drop(held);
        let again = tokio::time::timeout(
            Duration::from_secs(1),
            locks.acquire("gw", "azurerm_application_gateway"),
        )
        .await;
        assert!(again.is_ok());
    }

    #[tokio::test]
    async fn with_locks_takes_parent_first() {
        let locks = NamedLocks::new();
        let keys = vec![
            ("policy".to_string(), "azurerm_firewall_policy"),
            ("group".to_string(), "azurerm_firewall_policy_rule_group"),
        ];
        let out = locks.with_locks(&keys, async { 42 }).await;
        assert_eq!(out, 42);
        assert_eq!(locks.len(), 2);
        let _again = locks.acquire_all(&keys).await;
    }

    #[tokio::test]
    async fn children_released_before_parents() {
        let locks = NamedLocks::new();
        let keys = vec![
            ("circuit".to_string(), "azurerm_express_route_circuit"),
            ("AzurePrivatePeering".to_string(), "azurerm_express_route_circuit_peering"),
        ];
        let mut held = locks.acquire_all(&keys).await;
        assert_eq!(
            held.release(),
            [
                (
                    "azurerm_express_route_circuit_peering".to_string(),
                    "AzurePrivatePeering".to_string()
                ),
                (
                    "azurerm_express_route_circuit".to_string(),
                    "circuit".to_string()
                ),
            ]
        );
        assert!(held.release().is_empty());
        let again = tokio::time::timeout(Duration::from_secs(1), locks.acquire_all(&keys)).await;
        assert!(again.is_ok());
    }

    #[tokio::test]
    async fn dotted_names_do_not_collide() {
        let locks = NamedLocks::new();
        let _a = locks.acquire("c", "a.b").await;
        let b = tokio::time::timeout(Duration::from_secs(1), locks.acquire("b.c", "a")).await;
        assert!(b.is_ok());
        assert_eq!(locks.len(), 2);
    }
}
