use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

use super::auth::TokenManager;
use super::error::UpstreamError;
use super::http::{HttpClient, HttpRequest};
use super::vibes::{KeywordPicker, MoodQueryTable};

pub const SEARCH_LIMIT: u32 = 12;
pub const SEARCH_MARKET: &str = "US";

#[derive(Deserialize)]
struct SearchEnvelope {
    tracks: TrackPage,
}

#[derive(Deserialize)]
struct TrackPage {
    items: Vec<Value>,
}

/// Forwards mood-derived track searches to the Spotify catalog.
pub struct Search {
    tokens: Arc<TokenManager>,
    http: Arc<dyn HttpClient>,
    picker: Arc<dyn KeywordPicker>,
    table: MoodQueryTable,
    search_url: String,
}

impl Search {
    pub fn new(
        tokens: Arc<TokenManager>,
        http: Arc<dyn HttpClient>,
        picker: Arc<dyn KeywordPicker>,
        api_url: &str,
    ) -> Self {
        Search {
            tokens,
            http,
            picker,
            table: MoodQueryTable,
            search_url: format!("{}/search", api_url.trim_end_matches('/')),
        }
    }

    /// Upstream track records for a keyword drawn from `mood`'s list,
    /// returned exactly as Spotify sent them.
    pub async fn search_by_mood(&self, mood: Option<&str>) -> Result<Vec<Value>, UpstreamError> {
        let keyword = self.picker.pick(self.table.resolve(mood));
        info!("Searching for {} songs with {keyword:?}", mood.unwrap_or("unspecified"));

        let result = self.search_tracks(keyword).await;
        if let Err(ref e) = result {
            error!("Error searching Spotify: {e}");
        }
        result
    }

    async fn search_tracks(&self, keyword: &str) -> Result<Vec<Value>, UpstreamError> {
        let token = self.tokens.get_token().await?;

        let request = HttpRequest::get(&self.search_url)
            .header("Authorization", format!("Bearer {token}"))
            .query("q", keyword)
            .query("type", "track")
            .query("limit", SEARCH_LIMIT.to_string())
            .query("market", SEARCH_MARKET);

        let response = self
            .http
            .send(request)
            .await
            .map_err(UpstreamError::Transport)?;
        if !response.status.is_success() {
            return Err(UpstreamError::Rejected {
                status: response.status,
                body: response.body,
            });
        }

        let envelope: SearchEnvelope =
            serde_json::from_str(&response.body).map_err(UpstreamError::Malformed)?;
        info!("Found {} tracks", envelope.tracks.items.len());
        Ok(envelope.tracks.items)
    }
}
