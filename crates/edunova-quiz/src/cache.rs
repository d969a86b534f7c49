//! Session-scoped quiz cache using moka
//!
//! Maps roadmap node ids to their quiz payloads. Entries never expire or get
//! evicted; the cache lives as long as the session that owns it.

use edunova_core::{NodeId, QuizError, QuizPayload};
use moka::future::Cache;
use std::future::Future;
use std::sync::Arc;

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cached payloads
    pub entry_count: u64,
}

/// Quiz cache keyed by node id
///
/// Cheap to clone; clones share the same entries. The prefetch coordinator
/// and the view controller are its only writers.
///
/// Concurrent [`QuizCache::get_or_fetch`] calls for the same node are
/// coalesced: one fetch runs, the other callers wait on it. Failed fetches
/// leave no entry behind.
#[derive(Debug, Clone)]
pub struct QuizCache {
    inner: Cache<NodeId, Arc<QuizPayload>>,
}

impl QuizCache {
    /// Create an empty, unbounded cache
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Cache::builder().build(),
        }
    }

    /// Get cached payload
    #[inline]
    pub async fn get(&self, node_id: NodeId) -> Option<Arc<QuizPayload>> {
        self.inner.get(&node_id).await
    }

    /// Store payload, replacing any previous entry
    #[inline]
    pub async fn set(&self, node_id: NodeId, payload: impl Into<Arc<QuizPayload>>) {
        self.inner.insert(node_id, payload.into()).await;
    }

    /// Check if a payload is cached
    #[inline]
    #[must_use]
    pub fn has(&self, node_id: NodeId) -> bool {
        self.inner.contains_key(&node_id)
    }

    /// Return cached payload, or run `fetch` and cache its result
    ///
    /// `fetch` is only polled when no entry exists and no other fetch for
    /// the node is in flight.
    ///
    /// # Errors
    /// The error produced by whichever fetch this call waited on
    pub async fn get_or_fetch<F>(
        &self,
        node_id: NodeId,
        fetch: F,
    ) -> Result<Arc<QuizPayload>, QuizError>
    where
        F: Future<Output = Result<QuizPayload, QuizError>>,
    {
        self.inner
            .try_get_with(node_id, async move { fetch.await.map(Arc::new) })
            .await
            .map_err(|shared| (*shared).clone())
    }

    /// Drop every entry
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Get cache statistics
    ///
    /// Flushes pending maintenance first so the count is exact.
    pub async fn stats(&self) -> CacheStats {
        self.inner.run_pending_tasks().await;
        CacheStats {
            entry_count: self.inner.entry_count(),
        }
    }
}

impl Default for QuizCache {
    fn default() -> Self {
        Self::new()
    }
}
