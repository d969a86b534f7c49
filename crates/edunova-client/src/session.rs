//! Cookie-backed session state
//!
//! The roadmap is persisted as a single cookie,
//! `roadmap_data=<json>; path=/; max-age=<secs>`, and read back from a
//! `Cookie` header.

use async_trait::async_trait;
use edunova_core::{Roadmap, SessionError, SessionReader, SessionStore};
use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Codec for the roadmap cookie
#[derive(Debug, Clone, Copy)]
pub struct RoadmapCookie;

impl RoadmapCookie {
    /// Cookie name
    pub const NAME: &'static str = "roadmap_data";

    /// Encode a `Set-Cookie` value
    ///
    /// # Errors
    /// `SessionError::Encode` if the roadmap cannot be serialized
    pub fn encode(roadmap: &Roadmap, max_age: Duration) -> Result<String, SessionError> {
        let json = serde_json::to_string(roadmap).map_err(SessionError::Encode)?;
        Ok(format!(
            "{}={json}; path=/; max-age={}",
            Self::NAME,
            max_age.as_secs()
        ))
    }

    /// Decode the roadmap from a `Cookie` (or `Set-Cookie`) header
    ///
    /// Returns `Ok(None)` when the header has no roadmap pair. Only the first
    /// JSON value after `roadmap_data=` is read, so separators inside JSON
    /// strings are harmless.
    ///
    /// # Errors
    /// `SessionError::Decode` if the pair holds something other than a roadmap
    pub fn decode(header: &str) -> Result<Option<Roadmap>, SessionError> {
        let Some(value) = Self::find_value(header) else {
            return Ok(None);
        };
        serde_json::Deserializer::from_str(value)
            .into_iter::<Roadmap>()
            .next()
            .transpose()
            .map_err(SessionError::Decode)
    }

    fn find_value(header: &str) -> Option<&str> {
        let key = format!("{}=", Self::NAME);
        header.match_indices(&key).find_map(|(at, _)| {
            let before = header[..at].trim_end();
            (before.is_empty() || before.ends_with(';')).then(|| &header[at + key.len()..])
        })
    }
}

#[derive(Debug)]
struct StoredCookie {
    value: String,
    written_at: Instant,
}

/// In-process cookie jar holding the roadmap cookie
///
/// The cookie stops reading back once `max_age` has elapsed since it was
/// written.
#[derive(Debug)]
pub struct CookieSessionStore {
    cookie: Mutex<Option<StoredCookie>>,
    max_age: Duration,
}

impl CookieSessionStore {
    /// Create empty store
    #[must_use]
    pub fn new(max_age: Duration) -> Self {
        Self {
            cookie: Mutex::new(None),
            max_age,
        }
    }

    /// Current `Set-Cookie` value, if any and not expired
    #[must_use]
    pub fn set_cookie_header(&self) -> Option<String> {
        self.live_value()
    }

    fn live_value(&self) -> Option<String> {
        let mut cookie = self.cookie.lock();
        let expired = cookie
            .as_ref()
            .is_some_and(|c| c.written_at.elapsed() >= self.max_age);
        if expired {
            tracing::debug!("roadmap cookie expired");
            *cookie = None;
        }
        cookie.as_ref().map(|c| c.value.clone())
    }
}

impl Default for CookieSessionStore {
    fn default() -> Self {
        Self::new(Duration::from_secs(3600))
    }
}

#[async_trait]
impl SessionReader for CookieSessionStore {
    async fn read_persisted_roadmap(&self) -> Option<Roadmap> {
        let value = self.live_value()?;
        match RoadmapCookie::decode(&value) {
            Ok(roadmap) => roadmap,
            Err(error) => {
                tracing::warn!(%error, "discarding unreadable roadmap cookie");
                None
            }
        }
    }
}

#[async_trait]
impl SessionStore for CookieSessionStore {
    async fn write(&self, roadmap: &Roadmap) -> Result<(), SessionError> {
        let value = RoadmapCookie::encode(roadmap, self.max_age)?;
        *self.cookie.lock() = Some(StoredCookie {
            value,
            written_at: Instant::now(),
        });
        tracing::debug!(nodes = roadmap.len(), "roadmap persisted to session");
        Ok(())
    }

    async fn expire(&self) {
        *self.cookie.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edunova_core::NodeId;
    use edunova_test_utils::sample_roadmap;
    use pretty_assertions::assert_eq;

    #[test]
    fn encode_layout() {
        let value = RoadmapCookie::encode(&Roadmap::default(), Duration::from_secs(3600)).unwrap();
        assert_eq!(value, r#"roadmap_data={"roadmap":[]}; path=/; max-age=3600"#);
    }

    #[test]
    fn decode_from_cookie_header() {
        let roadmap = sample_roadmap(2);
        let json = serde_json::to_string(&roadmap).unwrap();
        let header = format!("theme=dark; roadmap_data={json}; other=1");

        assert_eq!(RoadmapCookie::decode(&header).unwrap(), Some(roadmap));
    }

    #[test]
    fn decode_tolerates_separators_inside_json() {
        let mut roadmap = sample_roadmap(1);
        roadmap.nodes[0].summary = "a; b=c; roadmap_data=x".to_string();
        let value = RoadmapCookie::encode(&roadmap, Duration::from_secs(60)).unwrap();

        assert_eq!(RoadmapCookie::decode(&value).unwrap(), Some(roadmap));
    }

    #[test]
    fn decode_ignores_suffix_matches() {
        assert_eq!(RoadmapCookie::decode("old_roadmap_data=1").unwrap(), None);
        assert_eq!(RoadmapCookie::decode("").unwrap(), None);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            RoadmapCookie::decode("roadmap_data=[1,2]"),
            Err(SessionError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn write_then_read() {
        let store = CookieSessionStore::default();
        assert!(store.read_persisted_roadmap().await.is_none());

        store.write(&sample_roadmap(3)).await.unwrap();
        let roadmap = store.read_persisted_roadmap().await.unwrap();
        assert!(roadmap.find(NodeId(3)).is_some());
    }

    #[tokio::test]
    async fn expire_drops_state() {
        let store = CookieSessionStore::default();
        store.write(&sample_roadmap(1)).await.unwrap();

        store.expire().await;
        assert!(store.read_persisted_roadmap().await.is_none());
        assert!(store.set_cookie_header().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn cookie_expires_after_max_age() {
        let store = CookieSessionStore::new(Duration::from_secs(3600));
        store.write(&sample_roadmap(1)).await.unwrap();

        tokio::time::advance(Duration::from_secs(3599)).await;
        assert!(store.read_persisted_roadmap().await.is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(store.read_persisted_roadmap().await.is_none());
    }
}
