use anyhow::Result;
use std::sync::Arc;

use crate::config::Config;
use self::auth::{Credentials, SystemClock, TokenManager};
use self::http::{HttpClient, ReqwestClient};
use self::search::Search;
use self::vibes::{KeywordPicker, RandomPicker, SeededPicker};

pub mod auth;
pub mod error;
pub mod http;
pub mod search;
pub mod vibes;

/// Wires the token manager and search proxy against the real Spotify API.
pub fn build_spotify_client(config: &Config) -> Result<(Arc<TokenManager>, Search)> {
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestClient::new(config.http_timeout)?);
    let creds = Credentials::new(&config.client_id, &config.client_secret);

    let tokens = Arc::new(TokenManager::new(
        creds,
        &config.accounts_url,
        http.clone(),
        Arc::new(SystemClock),
    ));
    let picker: Arc<dyn KeywordPicker> = match config.keyword_seed {
        Some(seed) => Arc::new(SeededPicker::new(seed)),
        None => Arc::new(RandomPicker),
    };
    let search = Search::new(tokens.clone(), http, picker, &config.api_url);

    Ok((tokens, search))
}
