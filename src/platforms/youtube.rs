// YouTube channel video listing via the Data API v3 search endpoint.
//
// Search results mix videos with channel and playlist hits; only items
// carrying `id.videoId` become posts. Everything is grouped under the
// caller-supplied channel id — the API exposes no per-item author
// variation for a single-channel search.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::post::{Grouping, Metadata, Post};

/// Default YouTube Data API endpoint.
pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Response from `GET /search?part=snippet`.
#[derive(Debug, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: ResourceId,
    pub snippet: Snippet,
}

#[derive(Debug, Deserialize, Default)]
pub struct ResourceId {
    #[serde(default, rename = "videoId")]
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Snippet {
    pub title: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// The one operation the YouTube adapter needs from its client.
#[async_trait]
pub trait ChannelSearch: Send + Sync {
    async fn search_channel_videos(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> Result<SearchListResponse>;
}

/// Collect a channel's videos, all grouped under `channel_id`.
pub async fn collect(
    client: Option<&dyn ChannelSearch>,
    channel_id: &str,
    max_results: u32,
) -> Result<Grouping> {
    let Some(client) = client else {
        warn!("no YouTube client supplied, returning empty grouping");
        return Ok(Grouping::new());
    };

    let response = client.search_channel_videos(channel_id, max_results).await?;

    let mut grouping = Grouping::new();
    for item in response.items {
        let Some(video_id) = item.id.video_id else {
            continue;
        };

        let mut metadata = Metadata::new();
        metadata.insert("published_at".to_string(), item.snippet.published_at.into());
        metadata.insert("description".to_string(), item.snippet.description.into());

        let post = Post::new(
            video_id,
            channel_id,
            Value::String(item.snippet.title),
            metadata,
        );
        grouping.entry(post.user_id.clone()).or_default().push(post);
    }

    debug!(
        channel_id = channel_id,
        videos = grouping.values().map(Vec::len).sum::<usize>(),
        "collected YouTube channel videos"
    );
    Ok(grouping)
}

/// API-key client for the YouTube Data API search endpoint.
pub struct YouTubeApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeApiClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("gleaner/0.1 (post-collection)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl ChannelSearch for YouTubeApiClient {
    async fn search_channel_videos(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> Result<SearchListResponse> {
        let url = format!("{}/search", self.base_url);
        let max_results = max_results.to_string();

        debug!(channel_id = channel_id, "YouTube search request");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("channelId", channel_id),
                ("maxResults", max_results.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("YouTube search request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("YouTube search returned {status}: {body}");
        }

        response
            .json::<SearchListResponse>()
            .await
            .context("Failed to deserialize YouTube search response")
    }
}
