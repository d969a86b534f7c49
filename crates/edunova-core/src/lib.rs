//! Edunova Core
//!
//! Shared vocabulary for the learning-roadmap client:
//! - Roadmap and quiz data model as exchanged with the backend
//! - Error taxonomy for quiz loading and session state
//! - Capability traits for the external collaborators
//! - Client configuration
//!
//! # Example
//!
//! ```rust
//! use edunova_core::{NodeId, Roadmap};
//!
//! let roadmap: Roadmap = serde_json::from_str(r#"{"roadmap": []}"#).unwrap();
//! assert!(roadmap.find(NodeId(1)).is_none());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod capability;
pub mod config;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use capability::{QuizFetcher, SessionReader, SessionStore};
pub use config::ClientConfig;
pub use error::{ConfigError, FetchError, NotFound, QuizError, SessionError};
pub use types::{
    Difficulty, EmbeddedQuestion, EmbeddedQuiz, NodeId, QuizPayload, QuizQuestion, QuizRequest,
    Roadmap, RoadmapNode,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Edunova types
    pub use crate::capability::{QuizFetcher, SessionReader, SessionStore};
    pub use crate::error::{FetchError, NotFound, QuizError};
    pub use crate::types::{NodeId, QuizPayload, QuizRequest, Roadmap, RoadmapNode};
}
