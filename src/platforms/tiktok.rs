// TikTok video search via the Research API.
//
// One query call, grouped by each video's creator id. The API mixes
// camelCase field names and numeric ids, so the response types lean on
// serde renames and the shared id coercion helper.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::post::{Grouping, Metadata, Post};

/// Default TikTok open API endpoint.
pub const DEFAULT_API_URL: &str = "https://open.tiktokapis.com";

/// Response from the research video query endpoint. `data` is omitted when
/// nothing matches.
#[derive(Debug, Deserialize)]
pub struct VideoSearchResponse {
    #[serde(default)]
    pub data: Vec<Video>,
}

#[derive(Debug, Deserialize)]
pub struct Video {
    #[serde(deserialize_with = "super::string_or_number")]
    pub id: String,
    pub author: Author,
    /// Caption text; absent for caption-less uploads.
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default, rename = "createTime")]
    pub create_time: Option<i64>,
    #[serde(default)]
    pub stats: Option<Stats>,
}

#[derive(Debug, Deserialize)]
pub struct Author {
    #[serde(deserialize_with = "super::string_or_number")]
    pub id: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct Stats {
    #[serde(default, rename = "diggCount")]
    pub digg_count: Option<i64>,
}

/// The one operation the TikTok adapter needs from its client.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn search_videos(&self, query: &str, max_count: u32) -> Result<VideoSearchResponse>;
}

/// Collect videos matching `query`, grouped by creator id.
pub async fn collect(
    client: Option<&dyn VideoSearch>,
    query: &str,
    limit: u32,
) -> Result<Grouping> {
    let Some(client) = client else {
        warn!("no TikTok client supplied, returning empty grouping");
        return Ok(Grouping::new());
    };

    let response = client.search_videos(query, limit).await?;

    let mut grouping = Grouping::new();
    for video in response.data {
        let mut metadata = Metadata::new();
        metadata.insert("create_time".to_string(), video.create_time.into());
        metadata.insert(
            "like_count".to_string(),
            video.stats.and_then(|s| s.digg_count).into(),
        );

        let caption = video.desc.unwrap_or_default();
        let post = Post::new(video.id, video.author.id, Value::String(caption), metadata);
        grouping.entry(post.user_id.clone()).or_default().push(post);
    }

    debug!(users = grouping.len(), query = query, "collected TikTok search results");
    Ok(grouping)
}

/// Bearer-token client for the TikTok Research API.
pub struct TikTokApiClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl TikTokApiClient {
    pub fn new(base_url: &str, access_token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("gleaner/0.1 (post-collection)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        })
    }
}

#[async_trait]
impl VideoSearch for TikTokApiClient {
    async fn search_videos(&self, query: &str, max_count: u32) -> Result<VideoSearchResponse> {
        let url = format!("{}/v2/research/video/query/", self.base_url);

        debug!(query = query, "TikTok video query request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&json!({
                "query": query,
                "max_count": max_count,
            }))
            .send()
            .await
            .context("TikTok video query request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("TikTok video query returned {status}: {body}");
        }

        response
            .json::<VideoSearchResponse>()
            .await
            .context("Failed to deserialize TikTok video query response")
    }
}
