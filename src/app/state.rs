use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::{
    app::mood::{classify, MoodReading},
    spotify::{auth::TokenManager, error::UpstreamError, search::Search},
    ui::Track,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Health {
    pub status: &'static str,
    pub has_token: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendations {
    pub mood: MoodReading,
    pub tracks: Vec<Track>,
}

/// Everything a request handler needs; shared across connections.
pub struct AppState {
    pub tokens: Arc<TokenManager>,
    pub search: Search,
}

impl AppState {
    pub fn new(tokens: Arc<TokenManager>, search: Search) -> Self {
        AppState { tokens, search }
    }

    pub async fn health(&self) -> Health {
        Health {
            status: "ok",
            has_token: self.tokens.has_token().await,
        }
    }

    pub fn analyze(&self, text: &str) -> MoodReading {
        classify(text).into()
    }

    pub async fn recommend(&self, text: &str) -> Result<Recommendations, UpstreamError> {
        let mood = classify(text);
        let label = mood.to_string();
        let records = self.search.search_by_mood(Some(label.as_str())).await?;

        let tracks = records
            .iter()
            .filter_map(|record| match Track::from_record(record, mood) {
                Ok(track) => Some(track),
                Err(e) => {
                    warn!("Skipping unreadable track record: {e}");
                    None
                }
            })
            .collect();

        Ok(Recommendations {
            mood: mood.into(),
            tracks,
        })
    }
}
