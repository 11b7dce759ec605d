// X (Twitter) recent-post search via the v2 API.
//
// One call to /2/tweets/search/recent, grouped by each tweet's author id.
// The API returns string ids and requires `tweet.fields` to be spelled out
// for anything beyond id and text.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::post::{Grouping, MetaValue, Metadata, Post};

/// Default X API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.twitter.com";

/// Response from `GET /2/tweets/search/recent`. `data` is omitted entirely
/// when the query matches nothing.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Option<Vec<Tweet>>,
}

#[derive(Debug, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    pub author_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub entities: Option<Entities>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Entities {
    #[serde(default)]
    pub hashtags: Option<Vec<Hashtag>>,
}

#[derive(Debug, Deserialize)]
pub struct Hashtag {
    pub tag: String,
}

/// The one operation the X adapter needs from its client.
#[async_trait]
pub trait RecentSearch: Send + Sync {
    async fn search_recent(&self, query: &str, max_results: u32) -> Result<SearchResponse>;
}

/// Collect recent posts matching `query`, grouped by author id.
pub async fn collect(
    client: Option<&dyn RecentSearch>,
    query: &str,
    max_results: u32,
) -> Result<Grouping> {
    let Some(client) = client else {
        warn!("no X client supplied, returning empty grouping");
        return Ok(Grouping::new());
    };

    let response = client.search_recent(query, max_results).await?;

    let mut grouping = Grouping::new();
    for tweet in response.data.unwrap_or_default() {
        let hashtags: Vec<String> = tweet
            .entities
            .and_then(|e| e.hashtags)
            .unwrap_or_default()
            .into_iter()
            .map(|h| h.tag)
            .collect();

        let mut metadata = Metadata::new();
        metadata.insert(
            "created_at".to_string(),
            tweet
                .created_at
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
                .into(),
        );
        metadata.insert("lang".to_string(), tweet.lang.into());
        metadata.insert("hashtags".to_string(), MetaValue::StrList(hashtags));

        let post = Post::new(
            tweet.id,
            tweet.author_id,
            Value::String(tweet.text),
            metadata,
        );
        grouping.entry(post.user_id.clone()).or_default().push(post);
    }

    debug!(users = grouping.len(), query = query, "collected X search results");
    Ok(grouping)
}

/// Bearer-token client for the X v2 recent search endpoint.
pub struct XApiClient {
    client: reqwest::Client,
    base_url: String,
    bearer_token: String,
}

impl XApiClient {
    pub fn new(base_url: &str, bearer_token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("gleaner/0.1 (post-collection)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: bearer_token.to_string(),
        })
    }
}

#[async_trait]
impl RecentSearch for XApiClient {
    async fn search_recent(&self, query: &str, max_results: u32) -> Result<SearchResponse> {
        let url = format!("{}/2/tweets/search/recent", self.base_url);
        let max_results = max_results.to_string();

        debug!(query = query, "X recent search request");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .query(&[
                ("query", query),
                ("max_results", max_results.as_str()),
                ("tweet.fields", "created_at,lang,entities"),
            ])
            .send()
            .await
            .context("X recent search request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("X recent search returned {status}: {body}");
        }

        response
            .json::<SearchResponse>()
            .await
            .context("Failed to deserialize X search response")
    }
}
