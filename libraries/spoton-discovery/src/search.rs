//! Remote catalog search
//!
//! Search runs in two steps against the hosted video API: a text search for
//! candidate ids, then a detail lookup for durations. Raw video titles are
//! split into artist/title heuristically because the catalog has no
//! structured artist field.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::Result;

/// One ranked search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub thumbnail: String,
    /// Display duration, "m:ss"
    pub duration: String,
}

/// Free-text catalog search
#[async_trait]
pub trait TrackSearch: Send + Sync {
    /// Search the remote catalog, best match first
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
}

#[cfg(test)]
mockall::mock! {
    pub TestTrackSearch {}

    #[async_trait]
    impl TrackSearch for TestTrackSearch {
        async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
    }
}

/// Music category id on the video platform
const MUSIC_CATEGORY: &str = "10";

/// Candidate count requested per search
const MAX_RESULTS: usize = 15;

/// HTTP search client for the hosted video-platform API
pub struct HttpTrackSearch {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTrackSearch {
    /// Create a client against the production API endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url("https://www.googleapis.com/youtube/v3", api_key)
    }

    /// Create a client against a custom endpoint (tests, proxies)
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn search_ids(&self, query: &str) -> Result<Vec<String>> {
        let url = format!("{}/search", self.base_url);
        let response: SearchListResponse = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("videoCategoryId", MUSIC_CATEGORY),
                ("maxResults", &MAX_RESULTS.to_string()),
                ("q", &format!("{query} music")),
                ("key", &self.api_key),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect())
    }

    async fn lookup_details(&self, ids: &[String]) -> Result<Vec<SearchResult>> {
        let url = format!("{}/videos", self.base_url);
        let response: VideoListResponse = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet,contentDetails"),
                ("id", &ids.join(",")),
                ("key", &self.api_key),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .items
            .into_iter()
            .map(|item| {
                let (artist, title) =
                    split_artist_title(&item.snippet.title, &item.snippet.channel_title);
                SearchResult {
                    id: item.id,
                    title,
                    artist,
                    thumbnail: item
                        .snippet
                        .thumbnails
                        .and_then(|t| t.default)
                        .map(|t| t.url)
                        .unwrap_or_default(),
                    duration: item
                        .content_details
                        .map(|d| format_iso_duration(&d.duration))
                        .unwrap_or_else(|| "0:00".to_string()),
                }
            })
            .collect())
    }
}

#[async_trait]
impl TrackSearch for HttpTrackSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let ids = self.search_ids(query).await?;
        if ids.is_empty() {
            debug!(query, "catalog search returned no candidates");
            return Ok(Vec::new());
        }
        self.lookup_details(&ids).await
    }
}

/// Split a raw "Artist - Title" video title; fall back to the channel name
/// as the artist
fn split_artist_title(raw_title: &str, channel: &str) -> (String, String) {
    for sep in [" - ", " \u{2013} ", " -- "] {
        if let Some((artist, title)) = raw_title.split_once(sep) {
            return (
                artist.trim().trim_end_matches(" - Topic").to_string(),
                title.trim().to_string(),
            );
        }
    }
    (
        channel.trim().trim_end_matches(" - Topic").to_string(),
        raw_title.trim().to_string(),
    )
}

/// Render an ISO-8601 duration (PT#H#M#S) as "m:ss"
fn format_iso_duration(duration: &str) -> String {
    let Some(rest) = duration.strip_prefix("PT") else {
        return "0:00".to_string();
    };

    let mut total_seconds: u64 = 0;
    let mut number = String::new();
    for ch in rest.chars() {
        if ch.is_ascii_digit() {
            number.push(ch);
            continue;
        }
        let value: u64 = number.parse().unwrap_or(0);
        number.clear();
        match ch {
            'H' => total_seconds += value * 3600,
            'M' => total_seconds += value * 60,
            'S' => total_seconds += value,
            _ => return "0:00".to_string(),
        }
    }

    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

// Wire types for the video API

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    id: String,
    snippet: VideoSnippet,
    content_details: Option<ContentDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoSnippet {
    title: String,
    #[serde(default)]
    channel_title: String,
    thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: String,
}
