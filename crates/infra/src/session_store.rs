//! Per-client session storage with idle expiry.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use rand::{Rng, thread_rng};

use campus_auth::SessionData;

/// Default idle window before a session lapses back to anonymous.
pub const DEFAULT_IDLE: Duration = Duration::from_secs(30 * 60);

/// Issue an opaque client token: 32 random bytes, hex-encoded.
pub fn issue_token() -> String {
    let mut bytes = [0u8; 32];
    thread_rng().fill(&mut bytes);
    hex::encode(bytes)
}

/// Session state keyed by opaque client token.
///
/// Expiry is passive: an entry idle longer than the configured window is
/// dropped on the next read, it is not reaped by a background task.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read a session. Refreshes the idle clock on hit; an expired entry
    /// reads back as absent.
    async fn get(&self, token: &str) -> Option<SessionData>;

    async fn put(&self, token: &str, data: SessionData);

    async fn remove(&self, token: &str);
}

struct SessionEntry {
    data: SessionData,
    last_seen: Instant,
}

/// In-memory session store. One entry per client token; storing under an
/// existing token replaces the previous state.
pub struct InMemorySessionStore {
    idle: Duration,
    inner: RwLock<HashMap<String, SessionEntry>>,
}

impl InMemorySessionStore {
    pub fn new(idle: Duration) -> Self {
        Self {
            idle,
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, token: &str) -> Option<SessionData> {
        let mut map = self.inner.write().ok()?;
        let entry = map.get_mut(token)?;
        if entry.last_seen.elapsed() > self.idle {
            map.remove(token);
            return None;
        }
        entry.last_seen = Instant::now();
        Some(entry.data.clone())
    }

    async fn put(&self, token: &str, data: SessionData) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(
                token.to_string(),
                SessionEntry {
                    data,
                    last_seen: Instant::now(),
                },
            );
        }
    }

    async fn remove(&self, token: &str) {
        if let Ok(mut map) = self.inner.write() {
            map.remove(token);
        }
    }
}
