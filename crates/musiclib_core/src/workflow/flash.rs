//! One-hop notice storage across a redirect.
//!
//! # Invariants
//! - A stashed entry is keyed by a fresh random token.
//! - `take` returns an entry at most once; the second call sees nothing.
//! - An entry older than the store's lifetime is never returned and is
//!   dropped on the next `stash` or `take`, so abandoned redirects do not
//!   accumulate.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// How long a stashed notice waits for the redirected request.
pub const FLASH_TTL: Duration = Duration::from_secs(180);

/// Attribute name → resolved notice text.
pub type FlashAttributes = BTreeMap<String, String>;

/// Handle a redirect carries to find its notices on the next request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlashToken(Uuid);

impl FlashToken {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for FlashToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FlashToken {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value).map(Self)
    }
}

/// Session-side storage for flash notices.
pub trait FlashStore {
    /// Stores notices for exactly one later read.
    fn stash(&self, attributes: FlashAttributes) -> FlashToken;
    /// Removes and returns the notices stored under `token`.
    fn take(&self, token: FlashToken) -> Option<FlashAttributes>;
}

/// Process-local flash store.
#[derive(Debug)]
pub struct InMemoryFlashStore {
    ttl: Duration,
    entries: Mutex<HashMap<FlashToken, (Instant, FlashAttributes)>>,
}

impl Default for InMemoryFlashStore {
    fn default() -> Self {
        Self::with_ttl(FLASH_TTL)
    }
}

impl InMemoryFlashStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of notices stashed but not yet consumed or expired.
    pub fn pending(&self) -> usize {
        self.live_entries().len()
    }

    fn live_entries(&self) -> MutexGuard<'_, HashMap<FlashToken, (Instant, FlashAttributes)>> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let ttl = self.ttl;
        entries.retain(|_, (stashed_at, _)| stashed_at.elapsed() < ttl);
        entries
    }
}

impl FlashStore for InMemoryFlashStore {
    fn stash(&self, attributes: FlashAttributes) -> FlashToken {
        let token = FlashToken::generate();
        self.live_entries()
            .insert(token, (Instant::now(), attributes));
        token
    }

    fn take(&self, token: FlashToken) -> Option<FlashAttributes> {
        self.live_entries()
            .remove(&token)
            .map(|(_, attributes)| attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::{FlashAttributes, FlashStore, FlashToken, InMemoryFlashStore};
    use std::time::Duration;

    #[test]
    fn take_is_one_shot() {
        let store = InMemoryFlashStore::new();
        let mut attributes = FlashAttributes::new();
        attributes.insert("alert_success".to_string(), "saved".to_string());

        let token = store.stash(attributes.clone());
        assert_eq!(store.pending(), 1);
        assert_eq!(store.take(token), Some(attributes));
        assert_eq!(store.take(token), None);
        assert_eq!(store.pending(), 0);
    }

    #[test]
    fn unknown_token_yields_nothing() {
        let store = InMemoryFlashStore::new();
        assert_eq!(store.take(FlashToken::generate()), None);
    }

    #[test]
    fn expired_notice_is_not_returned() {
        let store = InMemoryFlashStore::with_ttl(Duration::ZERO);
        let token = store.stash(FlashAttributes::new());
        assert_eq!(store.take(token), None);
        assert_eq!(store.pending(), 0);
    }

    #[test]
    fn abandoned_notices_do_not_accumulate() {
        let store = InMemoryFlashStore::with_ttl(Duration::ZERO);
        for _ in 0..100 {
            store.stash(FlashAttributes::new());
        }
        assert_eq!(store.pending(), 0);

        let store = InMemoryFlashStore::new();
        let kept = store.stash(FlashAttributes::new());
        store.stash(FlashAttributes::new());
        assert_eq!(store.pending(), 2);
        assert!(store.take(kept).is_some());
        assert_eq!(store.pending(), 1);
    }

    #[test]
    fn token_round_trips_through_text() {
        let token = FlashToken::generate();
        let parsed: FlashToken = token.to_string().parse().expect("token text should parse");
        assert_eq!(parsed, token);
    }
}
