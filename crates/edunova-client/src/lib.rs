//! Edunova Client
//!
//! Concrete collaborators for the quiz subsystem:
//! - [`BackendClient`]: reqwest client for the roadmap backend, implementing
//!   [`edunova_core::QuizFetcher`]
//! - [`CookieSessionStore`]: session state persisted as a roadmap cookie

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod http;
pub mod session;

pub use http::BackendClient;
pub use session::{CookieSessionStore, RoadmapCookie};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
