// Bilibili uploader video listing via the space archive endpoint.
//
// One GET against /x/space/arc/search, fixed to page 1, grouped under the
// caller-supplied uploader id. The response nests the video list three
// levels deep and omits levels freely, so every layer defaults.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::post::{Grouping, Metadata, Post};

/// Default Bilibili API endpoint — public and unauthenticated.
pub const DEFAULT_API_URL: &str = "https://api.bilibili.com";

/// Response from `GET /x/space/arc/search`.
#[derive(Debug, Deserialize)]
pub struct SpaceSearchResponse {
    #[serde(default)]
    pub data: Option<SpaceData>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SpaceData {
    #[serde(default)]
    pub list: Option<VideoList>,
}

#[derive(Debug, Deserialize, Default)]
pub struct VideoList {
    #[serde(default)]
    pub vlist: Vec<VideoEntry>,
}

#[derive(Debug, Deserialize)]
pub struct VideoEntry {
    pub bvid: String,
    pub title: String,
    /// Play count, named `play` on the wire.
    #[serde(default)]
    pub play: Option<i64>,
    #[serde(default)]
    pub like: Option<i64>,
    /// Danmaku (on-screen comment) count, named `video_review` on the wire.
    #[serde(default)]
    pub video_review: Option<i64>,
}

/// The one operation the Bilibili adapter needs from its client.
#[async_trait]
pub trait UploaderVideos: Send + Sync {
    async fn uploader_videos(&self, uid: &str, limit: u32) -> Result<SpaceSearchResponse>;
}

/// Collect an uploader's videos, all grouped under `uid`.
pub async fn collect(
    client: Option<&dyn UploaderVideos>,
    uid: &str,
    limit: u32,
) -> Result<Grouping> {
    let Some(client) = client else {
        warn!("no Bilibili client supplied, returning empty grouping");
        return Ok(Grouping::new());
    };

    let response = client.uploader_videos(uid, limit).await?;

    let videos = response
        .data
        .and_then(|d| d.list)
        .map(|l| l.vlist)
        .unwrap_or_default();

    let mut grouping = Grouping::new();
    for video in videos {
        let mut metadata = Metadata::new();
        metadata.insert("view".to_string(), video.play.into());
        metadata.insert("like".to_string(), video.like.into());
        metadata.insert("danmaku".to_string(), video.video_review.into());

        let post = Post::new(video.bvid, uid, Value::String(video.title), metadata);
        grouping.entry(post.user_id.clone()).or_default().push(post);
    }

    debug!(
        uid = uid,
        videos = grouping.values().map(Vec::len).sum::<usize>(),
        "collected Bilibili uploader videos"
    );
    Ok(grouping)
}

/// Unauthenticated client for the public Bilibili API.
pub struct BilibiliApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl BilibiliApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("gleaner/0.1 (post-collection)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl UploaderVideos for BilibiliApiClient {
    async fn uploader_videos(&self, uid: &str, limit: u32) -> Result<SpaceSearchResponse> {
        let url = format!("{}/x/space/arc/search", self.base_url);
        let page_size = limit.to_string();

        debug!(uid = uid, "Bilibili space search request");

        let response = self
            .client
            .get(&url)
            .query(&[("mid", uid), ("ps", page_size.as_str()), ("pn", "1")])
            .send()
            .await
            .context("Bilibili space search request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Bilibili space search returned {status}: {body}");
        }

        response
            .json::<SpaceSearchResponse>()
            .await
            .context("Failed to deserialize Bilibili space search response")
    }
}
