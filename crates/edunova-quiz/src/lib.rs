//! Edunova Quiz
//!
//! Quiz delivery for roadmap nodes:
//! - [`QuizCache`]: session-scoped node id to quiz map
//! - [`PrefetchCoordinator`]: warms the cache for a whole roadmap
//! - [`QuizViewController`]: serves the quiz of an opened node, falling
//!   back to an on-demand fetch on a cache miss
//! - [`QuizAttempt`]: selections and scoring for one quiz
//!
//! # Example
//!
//! ```rust,no_run
//! use edunova_quiz::{PrefetchCoordinator, QuizCache, QuizViewController};
//! # use edunova_core::{NodeId, QuizFetcher, Roadmap, SessionReader};
//! # use std::sync::Arc;
//! # async fn demo(
//! #     fetcher: Arc<dyn QuizFetcher>,
//! #     session: Arc<dyn SessionReader>,
//! #     roadmap: Roadmap,
//! # ) {
//! let cache = QuizCache::new();
//! PrefetchCoordinator::new(cache.clone(), fetcher.clone()).spawn_prefetch(roadmap);
//!
//! let controller = QuizViewController::new(cache, fetcher, session);
//! let quiz = controller.load_quiz(NodeId(1)).await;
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod attempt;
pub mod cache;
pub mod controller;
pub mod prefetch;

pub use attempt::{AttemptError, QuizAttempt, Score};
pub use cache::{CacheStats, QuizCache};
pub use controller::{QuizLoadState, QuizView, QuizViewController};
pub use prefetch::{PrefetchCoordinator, PrefetchReport};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
