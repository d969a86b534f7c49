//! Capability traits for external collaborators
//!
//! The quiz subsystem only talks to the outside world through these seams:
//! - [`QuizFetcher`] generates or retrieves quiz content for a node
//! - [`SessionReader`] recovers the roadmap persisted for this session
//! - [`SessionStore`] additionally writes and expires that state

use crate::error::{FetchError, SessionError};
use crate::types::{QuizPayload, QuizRequest, Roadmap};
use async_trait::async_trait;

/// Quiz fetch capability
///
/// Implementations fail with [`FetchError`] on any transport or
/// server-side failure.
#[async_trait]
pub trait QuizFetcher: Send + Sync {
    /// Fetch the quiz for the requested node
    async fn fetch_quiz(&self, request: &QuizRequest) -> Result<QuizPayload, FetchError>;
}

/// Read access to session-scoped roadmap state
#[async_trait]
pub trait SessionReader: Send + Sync {
    /// Roadmap persisted for this session, if any
    ///
    /// Absent, expired and undecodable state all read as `None`.
    async fn read_persisted_roadmap(&self) -> Option<Roadmap>;
}

/// Full session state store
#[async_trait]
pub trait SessionStore: SessionReader {
    /// Persist the roadmap, replacing any previous value
    async fn write(&self, roadmap: &Roadmap) -> Result<(), SessionError>;

    /// Drop persisted state
    async fn expire(&self);
}
