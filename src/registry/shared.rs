//! Mediator shared between tasks
//!
//! Tree mutation and traversal must not interleave, so the shared handle
//! guards the whole mediator with one exclusive lock held for the entire
//! operation, dispatch included.
//!
//! Handlers run while the lock is held. They must use the `&mut Mediator`
//! they are given; locking the shared handle from inside a handler never
//! completes.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::error::{HandlerResult, MediatorError};
use super::store::Mediator;
use crate::stats::{NamespaceSnapshot, RegistryStats};

/// Cloneable handle to a mediator behind an async lock
pub struct SharedMediator<D> {
    inner: Arc<Mutex<Mediator<D>>>,
}

impl<D: 'static> SharedMediator<D> {
    /// Wrap a mediator
    pub fn new(mediator: Mediator<D>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(mediator)),
        }
    }

    /// Register a handler on a channel
    pub async fn on<F>(&self, channel: &str, callback: F)
    where
        F: Fn(&mut Mediator<D>, &D) -> HandlerResult + Send + Sync + 'static,
    {
        self.inner.lock().await.on(channel, callback);
    }

    /// Register a callback invoked with a bound context
    pub async fn on_with<C, F>(&self, channel: &str, context: C, callback: F)
    where
        C: Send + Sync + 'static,
        F: Fn(&C, &mut Mediator<D>, &D) -> HandlerResult + Send + Sync + 'static,
    {
        self.inner.lock().await.on_with(channel, context, callback);
    }

    /// Remove the handlers of a channel, optionally pruning its subtree
    pub async fn off(&self, channel: &str, with_nested: bool) {
        self.inner.lock().await.off_nested(channel, with_nested);
    }

    /// Dispatch to exactly one channel
    pub async fn trigger(&self, channel: &str, data: &D) -> Result<(), MediatorError> {
        self.inner.lock().await.trigger(channel, data).map(|_| ())
    }

    /// Dispatch to a channel and its descendants
    pub async fn broadcast(&self, channel: &str, data: &D) -> Result<(), MediatorError> {
        self.inner.lock().await.broadcast(channel, data).map(|_| ())
    }

    /// Check if a channel exists
    pub async fn has(&self, channel: &str) -> bool {
        self.inner.lock().await.has(channel)
    }

    /// Discard every channel and handler
    pub async fn clean(&self) {
        self.inner.lock().await.clean();
    }

    /// Get registry statistics
    pub async fn stats(&self) -> RegistryStats {
        self.inner.lock().await.stats()
    }

    /// Read-only view of the forest
    pub async fn storage(&self) -> NamespaceSnapshot {
        self.inner.lock().await.storage()
    }

    /// Run several operations under a single lock acquisition
    pub async fn with<R>(&self, f: impl FnOnce(&mut Mediator<D>) -> R) -> R {
        let mut mediator = self.inner.lock().await;
        f(&mut *mediator)
    }
}

impl<D> Clone for SharedMediator<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D: 'static> Default for SharedMediator<D> {
    fn default() -> Self {
        Self::new(Mediator::new())
    }
}

impl<D: 'static> From<Mediator<D>> for SharedMediator<D> {
    fn from(mediator: Mediator<D>) -> Self {
        Self::new(mediator)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use bytes::Bytes;
    use tokio_test::{assert_err, assert_ok};

    use super::*;

    #[tokio::test]
    async fn test_shared_register_and_trigger() {
        let shared: SharedMediator<Bytes> = SharedMediator::default();
        let received = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&received);

        shared
            .on("app:events", move |_, data: &Bytes| {
                counter.fetch_add(data.len(), Ordering::SeqCst);
                Ok(())
            })
            .await;

        assert!(shared.has("app:events").await);
        assert_ok!(shared.trigger("app:events", &Bytes::from_static(b"hello")).await);
        assert_eq!(received.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_shared_missing_channel() {
        let shared: SharedMediator<Bytes> = SharedMediator::default();

        let err = assert_err!(shared.broadcast("nope", &Bytes::new()).await);
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_shared_off_and_clean() {
        let shared: SharedMediator<u32> = SharedMediator::default();
        shared.on("a:b:c", |_, _| Ok(())).await;

        shared.off("a:b", true).await;
        assert!(shared.has("a:b").await);
        assert!(!shared.has("a:b:c").await);

        shared.clean().await;
        assert!(!shared.has("a").await);
        assert_eq!(shared.stats().await.node_count, 0);
    }

    #[tokio::test]
    async fn test_shared_across_tasks() {
        let shared: SharedMediator<u32> = SharedMediator::default();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        shared
            .on_with("jobs", counter, |ctx: &Arc<AtomicUsize>, _, _| {
                ctx.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .await;

        let mut tasks = Vec::new();
        for i in 0..8 {
            let shared = shared.clone();
            tasks.push(tokio::spawn(async move {
                shared.trigger("jobs", &i).await
            }));
        }
        for task in tasks {
            assert_ok!(task.await.unwrap());
        }

        assert_eq!(hits.load(Ordering::SeqCst), 8);
        assert_eq!(shared.stats().await.dispatch.triggers, 8);
    }

    #[tokio::test]
    async fn test_shared_with_batches_operations() {
        let shared: SharedMediator<u32> = Mediator::new().into();

        let paths = shared
            .with(|mediator| {
                mediator.on("x:y", |_, _| Ok(())).on("x:z", |_, _| Ok(()));
                mediator.paths()
            })
            .await;

        assert_eq!(paths, vec!["x", "x:y", "x:z"]);
        assert_eq!(shared.storage().await.node_count(), 4);
    }
}
