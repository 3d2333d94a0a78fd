use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use super::error::AuthError;
use super::http::{HttpClient, HttpRequest};
use crate::cache::{CachedToken, TokenCache};

/// Source of "now" for token expiry checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Credentials {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// `client_id:client_secret`, base64 encoded for an HTTP Basic header.
    pub fn basic_auth(&self) -> String {
        base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.client_id, self.client_secret))
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Client-credentials token holder. Refreshes lazily when the cached
/// token is missing or expired; at most one refresh runs at a time.
pub struct TokenManager {
    credentials: Credentials,
    token_url: String,
    http: Arc<dyn HttpClient>,
    clock: Arc<dyn Clock>,
    cache: TokenCache,
    refresh: Mutex<()>,
}

impl TokenManager {
    pub fn new(
        credentials: Credentials,
        accounts_url: &str,
        http: Arc<dyn HttpClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        TokenManager {
            credentials,
            token_url: format!("{}/api/token", accounts_url.trim_end_matches('/')),
            http,
            clock,
            cache: TokenCache::new(),
            refresh: Mutex::new(()),
        }
    }

    pub async fn get_token(&self) -> Result<String, AuthError> {
        if let Some(token) = self.cache.get(self.clock.now()).await {
            return Ok(token);
        }

        let _guard = self.refresh.lock().await;

        // Another caller may have refreshed while we waited for the lock.
        if let Some(token) = self.cache.get(self.clock.now()).await {
            debug!("Reusing token refreshed by a concurrent request");
            return Ok(token);
        }

        match self.request_token().await {
            Ok(token) => {
                let value = token.value.clone();
                self.cache.set(token).await;
                info!("Spotify token obtained");
                Ok(value)
            }
            Err(e) => {
                error!("Error getting token: {e}");
                Err(e)
            }
        }
    }

    /// Whether a token has ever been cached. Never touches the network.
    pub async fn has_token(&self) -> bool {
        self.cache.is_present().await
    }

    async fn request_token(&self) -> Result<CachedToken, AuthError> {
        let request = HttpRequest::post(&self.token_url, "grant_type=client_credentials")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header(
                "Authorization",
                format!("Basic {}", self.credentials.basic_auth()),
            );

        let response = self.http.send(request).await?;
        if !response.status.is_success() {
            return Err(AuthError::Rejected {
                status: response.status,
                body: response.body,
            });
        }

        let body: TokenResponse =
            serde_json::from_str(&response.body).map_err(AuthError::Malformed)?;

        let expires_at = Duration::try_seconds(body.expires_in)
            .and_then(|lifetime| self.clock.now().checked_add_signed(lifetime))
            .ok_or(AuthError::InvalidLifetime(body.expires_in))?;

        Ok(CachedToken {
            value: body.access_token,
            expires_at,
        })
    }

    #[cfg(test)]
    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }
}
