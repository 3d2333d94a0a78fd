use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::app::mood::Mood;

/// Display-ready track, built from an upstream track record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub duration: String,
    pub image: Option<String>,
    pub color: &'static str,
    pub preview_url: Option<String>,
    pub spotify_url: Option<String>,
}

#[derive(Deserialize)]
struct TrackRecord {
    id: String,
    name: String,
    #[serde(default)]
    artists: Vec<ArtistRecord>,
    #[serde(default)]
    duration_ms: u64,
    #[serde(default)]
    album: Option<AlbumRecord>,
    #[serde(default)]
    preview_url: Option<String>,
    #[serde(default)]
    external_urls: ExternalUrls,
}

#[derive(Deserialize)]
struct ArtistRecord {
    name: String,
}

#[derive(Deserialize)]
struct AlbumRecord {
    #[serde(default)]
    images: Vec<ImageRecord>,
}

#[derive(Deserialize)]
struct ImageRecord {
    url: String,
}

#[derive(Deserialize, Default)]
struct ExternalUrls {
    spotify: Option<String>,
}

impl Track {
    pub fn from_record(record: &Value, mood: Mood) -> Result<Self, serde_json::Error> {
        let record = TrackRecord::deserialize(record)?;

        Ok(Track {
            id: record.id,
            title: record.name,
            artist: record
                .artists
                .into_iter()
                .map(|a| a.name)
                .collect::<Vec<_>>()
                .join(", "),
            genre: mood.genre_label(),
            duration: format_duration(record.duration_ms),
            image: record
                .album
                .and_then(|album| album.images.into_iter().next())
                .map(|image| image.url),
            color: mood.color(),
            preview_url: record.preview_url,
            spotify_url: record.external_urls.spotify,
        })
    }
}

/// `m:ss`, rounded to the nearest second.
pub fn format_duration(ms: u64) -> String {
    let secs = (ms + 500) / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}
