use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// A bearer token and the instant it stops being usable.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Single-slot token cache. Each store overwrites the previous token.
#[derive(Default)]
pub struct TokenCache {
    slot: RwLock<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        TokenCache::default()
    }

    /// Returns the cached token only while it is still usable at `now`.
    pub async fn get(&self, now: DateTime<Utc>) -> Option<String> {
        self.slot
            .read()
            .await
            .as_ref()
            .filter(|token| token.is_usable(now))
            .map(|token| token.value.clone())
    }

    pub async fn set(&self, token: CachedToken) {
        *self.slot.write().await = Some(token);
    }

    /// Whether any token has been stored, expired or not.
    pub async fn is_present(&self) -> bool {
        self.slot.read().await.is_some()
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> Option<CachedToken> {
        self.slot.read().await.clone()
    }
}
