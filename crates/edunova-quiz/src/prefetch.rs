//! Quiz prefetch coordinator
//!
//! Warms the quiz cache for every node of a roadmap as soon as the roadmap
//! is known:
//! - One fetch per node, all issued without waiting on each other
//! - Each result lands in the cache as it arrives
//! - A failing node is logged and skipped; it never blocks the others
//!
//! Prefetching is best-effort. Nodes it misses are recovered later by
//! [`crate::QuizViewController`].

use crate::cache::QuizCache;
use edunova_core::{NodeId, QuizError, QuizFetcher, QuizRequest, Roadmap, RoadmapNode};
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Outcome of one prefetch run
///
/// No ordering is guaranteed between entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefetchReport {
    /// Nodes whose quiz is now cached
    pub cached: Vec<NodeId>,
    /// Nodes whose fetch failed, with the reason
    pub failed: Vec<(NodeId, QuizError)>,
}

impl PrefetchReport {
    /// Number of nodes attempted
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.cached.len() + self.failed.len()
    }

    /// Whether every node was cached
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Prefetches quizzes for whole roadmaps
#[derive(Clone)]
pub struct PrefetchCoordinator {
    cache: QuizCache,
    fetcher: Arc<dyn QuizFetcher>,
    /// Cap on in-flight fetches; `None` issues every node at once
    concurrency: Option<usize>,
}

impl std::fmt::Debug for PrefetchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefetchCoordinator")
            .field("cache", &self.cache)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

impl PrefetchCoordinator {
    /// Create coordinator writing into `cache`
    #[inline]
    #[must_use]
    pub fn new(cache: QuizCache, fetcher: Arc<dyn QuizFetcher>) -> Self {
        Self {
            cache,
            fetcher,
            concurrency: None,
        }
    }

    /// With a cap on in-flight fetches
    ///
    /// `None` or `Some(0)` removes the cap.
    #[inline]
    #[must_use]
    pub fn with_concurrency(mut self, limit: Option<usize>) -> Self {
        self.concurrency = limit.filter(|limit| *limit > 0);
        self
    }

    /// Fetch and cache the quiz of every node
    ///
    /// Resolves once every per-node fetch has settled. Failed nodes are not
    /// retried and stay absent from the cache.
    pub async fn prefetch_all(&self, roadmap: &Roadmap) -> PrefetchReport {
        tracing::info!(nodes = roadmap.len(), "prefetching quizzes");

        let fetches: Vec<_> = roadmap.iter().map(|node| self.prefetch_node(node)).collect();
        let outcomes: Vec<(NodeId, Result<(), QuizError>)> = match self.concurrency {
            Some(limit) => stream::iter(fetches).buffer_unordered(limit).collect().await,
            None => join_all(fetches).await,
        };

        let mut report = PrefetchReport::default();
        for (node_id, outcome) in outcomes {
            match outcome {
                Ok(()) => report.cached.push(node_id),
                Err(error) => report.failed.push((node_id, error)),
            }
        }

        tracing::info!(
            succeeded = report.cached.len(),
            failed = report.failed.len(),
            "quiz prefetch settled"
        );
        report
    }

    /// Run [`PrefetchCoordinator::prefetch_all`] on a background task
    ///
    /// The caller is never gated on the warm-up; awaiting the handle is
    /// optional.
    pub fn spawn_prefetch(&self, roadmap: Roadmap) -> JoinHandle<PrefetchReport> {
        let coordinator = self.clone();
        tokio::spawn(async move { coordinator.prefetch_all(&roadmap).await })
    }

    async fn prefetch_node(&self, node: &RoadmapNode) -> (NodeId, Result<(), QuizError>) {
        let node_id = node.node_id;
        let request = QuizRequest::for_node(node);
        let fetcher = &self.fetcher;

        let outcome = self
            .cache
            .get_or_fetch(node_id, async move {
                fetcher.fetch_quiz(&request).await.map_err(QuizError::from)
            })
            .await;

        match &outcome {
            Ok(payload) => {
                tracing::debug!(%node_id, questions = payload.len(), "quiz prefetched");
            }
            Err(error) => {
                tracing::warn!(%node_id, topic = %node.topic, %error, "quiz prefetch failed");
            }
        }

        (node_id, outcome.map(|_| ()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edunova_test_utils::{sample_payload, sample_roadmap, FakeQuizFetcher};

    #[tokio::test]
    async fn prefetch_fills_cache() {
        let cache = QuizCache::new();
        let fetcher = Arc::new(FakeQuizFetcher::new());
        let coordinator = PrefetchCoordinator::new(cache.clone(), fetcher.clone());

        let report = coordinator.prefetch_all(&sample_roadmap(3)).await;

        assert_eq!(report.total(), 3);
        assert!(report.is_complete());
        for id in 1..=3 {
            assert_eq!(*cache.get(NodeId(id)).await.unwrap(), sample_payload(NodeId(id)));
        }
        assert_eq!(fetcher.call_count(), 3);
    }

    #[tokio::test]
    async fn prefetch_empty_roadmap() {
        let coordinator =
            PrefetchCoordinator::new(QuizCache::new(), Arc::new(FakeQuizFetcher::new()));

        let report = coordinator.prefetch_all(&Roadmap::default()).await;
        assert_eq!(report, PrefetchReport::default());
    }

    #[tokio::test]
    async fn prefetch_skips_cached_nodes() {
        let cache = QuizCache::new();
        cache.set(NodeId(2), sample_payload(NodeId(2))).await;

        let fetcher = Arc::new(FakeQuizFetcher::new());
        let coordinator = PrefetchCoordinator::new(cache, fetcher.clone());

        let report = coordinator.prefetch_all(&sample_roadmap(3)).await;
        assert_eq!(report.cached.len(), 3);
        assert_eq!(fetcher.calls_for(NodeId(2)), 0);
    }

    #[tokio::test]
    async fn spawned_prefetch_runs_on_background_task() {
        let cache = QuizCache::new();
        let fetcher = Arc::new(FakeQuizFetcher::new());
        let coordinator = PrefetchCoordinator::new(cache.clone(), fetcher.clone());

        let report = coordinator.spawn_prefetch(sample_roadmap(4)).await.unwrap();

        assert_eq!(report.cached.len(), 4);
        assert!(cache.has(NodeId(4)));
        assert_eq!(fetcher.call_count(), 4);
    }

    #[tokio::test]
    async fn spawned_prefetch_with_cap() {
        let cache = QuizCache::new();
        let coordinator = PrefetchCoordinator::new(cache.clone(), Arc::new(FakeQuizFetcher::new()))
            .with_concurrency(Some(2));

        let report = coordinator.spawn_prefetch(sample_roadmap(5)).await.unwrap();
        assert!(report.is_complete());
        assert_eq!(cache.stats().await.entry_count, 5);
    }

    #[test]
    fn zero_concurrency_means_unbounded() {
        let coordinator =
            PrefetchCoordinator::new(QuizCache::new(), Arc::new(FakeQuizFetcher::new()))
                .with_concurrency(Some(0));
        assert_eq!(coordinator.concurrency, None);
    }
}
