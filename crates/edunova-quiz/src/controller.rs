//! Quiz view controller
//!
//! Serves a node's quiz when the user opens it. Cache hits return
//! immediately; on a miss the fetch request is rebuilt from the roadmap
//! persisted in session state and the result is written through to the
//! cache.

use crate::cache::QuizCache;
use edunova_core::{
    NodeId, NotFound, QuizError, QuizFetcher, QuizPayload, QuizRequest, SessionReader,
};
use std::sync::Arc;
use tokio::sync::watch;

/// Load state exposed to a quiz view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QuizLoadState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Fetch in flight
    Loading,
    /// Quiz available
    Ready(Arc<QuizPayload>),
    /// Load failed; the caller may retry
    Failed(QuizError),
}

/// Loads quizzes for opened nodes
#[derive(Clone)]
pub struct QuizViewController {
    cache: QuizCache,
    fetcher: Arc<dyn QuizFetcher>,
    session: Arc<dyn SessionReader>,
}

impl std::fmt::Debug for QuizViewController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizViewController")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl QuizViewController {
    /// Create controller
    #[inline]
    #[must_use]
    pub fn new(
        cache: QuizCache,
        fetcher: Arc<dyn QuizFetcher>,
        session: Arc<dyn SessionReader>,
    ) -> Self {
        Self {
            cache,
            fetcher,
            session,
        }
    }

    /// Load the quiz for a node
    ///
    /// # Errors
    /// - `QuizError::NotFound` if no roadmap is persisted or it lacks the node
    /// - `QuizError::FetchFailed` if the fetch capability fails; nothing is
    ///   cached and the caller may retry
    pub async fn load_quiz(&self, node_id: NodeId) -> Result<Arc<QuizPayload>, QuizError> {
        if let Some(payload) = self.cache.get(node_id).await {
            tracing::debug!(%node_id, "quiz cache hit");
            return Ok(payload);
        }

        tracing::debug!(%node_id, "quiz cache miss");
        let result = self
            .cache
            .get_or_fetch(node_id, self.fetch_from_session(node_id))
            .await;

        if let Err(error) = &result {
            tracing::error!(%node_id, %error, "failed to load quiz");
        }
        result
    }

    /// Open a stateful view for one node
    #[must_use]
    pub fn view(&self, node_id: NodeId) -> QuizView {
        let (state, _) = watch::channel(QuizLoadState::Idle);
        QuizView {
            controller: self.clone(),
            node_id,
            state,
        }
    }

    async fn fetch_from_session(&self, node_id: NodeId) -> Result<QuizPayload, QuizError> {
        let roadmap = self
            .session
            .read_persisted_roadmap()
            .await
            .ok_or(NotFound::Roadmap)?;
        let node = roadmap.find(node_id).ok_or(NotFound::Node(node_id))?;

        let request = QuizRequest::for_node(node);
        Ok(self.fetcher.fetch_quiz(&request).await?)
    }
}

/// One opened quiz with observable load state
///
/// Retrying is re-invoking [`QuizView::load`].
#[derive(Debug)]
pub struct QuizView {
    controller: QuizViewController,
    node_id: NodeId,
    state: watch::Sender<QuizLoadState>,
}

impl QuizView {
    /// Node this view shows
    #[inline]
    #[must_use]
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> QuizLoadState {
        self.state.borrow().clone()
    }

    /// Watch state transitions
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QuizLoadState> {
        self.state.subscribe()
    }

    /// Load (or reload) the quiz, publishing each state transition
    ///
    /// A cache hit goes straight to `Ready` without passing `Loading`.
    ///
    /// # Errors
    /// Same as [`QuizViewController::load_quiz`]
    pub async fn load(&self) -> Result<Arc<QuizPayload>, QuizError> {
        if !self.controller.cache.has(self.node_id) {
            self.state.send_replace(QuizLoadState::Loading);
        }

        let result = self.controller.load_quiz(self.node_id).await;
        let next = match &result {
            Ok(payload) => QuizLoadState::Ready(Arc::clone(payload)),
            Err(error) => QuizLoadState::Failed(error.clone()),
        };
        self.state.send_replace(next);
        result
    }
}
