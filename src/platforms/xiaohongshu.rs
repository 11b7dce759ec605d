// Xiaohongshu note search.
//
// One paged GET against the notes search endpoint (first page only),
// grouped by each note's user id. The gateway URL is proprietary and
// comes entirely from configuration — there is no public default.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::post::{Grouping, Metadata, Post};

/// Response from `GET /notes/search`.
#[derive(Debug, Deserialize)]
pub struct NoteSearchResponse {
    #[serde(default)]
    pub data: Vec<Note>,
}

#[derive(Debug, Deserialize)]
pub struct Note {
    #[serde(deserialize_with = "super::string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "super::string_or_number")]
    pub user_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub likes: Option<i64>,
    #[serde(default)]
    pub comments: Option<i64>,
}

/// The one operation the Xiaohongshu adapter needs from its client.
#[async_trait]
pub trait NoteSearch: Send + Sync {
    async fn search_notes(&self, keyword: &str, limit: u32) -> Result<NoteSearchResponse>;
}

/// Collect notes matching `keyword`, grouped by the note's author id.
pub async fn collect(
    client: Option<&dyn NoteSearch>,
    keyword: &str,
    limit: u32,
) -> Result<Grouping> {
    let Some(client) = client else {
        warn!("no Xiaohongshu client supplied, returning empty grouping");
        return Ok(Grouping::new());
    };

    let response = client.search_notes(keyword, limit).await?;

    let mut grouping = Grouping::new();
    for note in response.data {
        let mut metadata = Metadata::new();
        metadata.insert("likes".to_string(), note.likes.into());
        metadata.insert("comments".to_string(), note.comments.into());

        let title = note.title.unwrap_or_default();
        let post = Post::new(note.id, note.user_id, Value::String(title), metadata);
        grouping.entry(post.user_id.clone()).or_default().push(post);
    }

    debug!(
        users = grouping.len(),
        keyword = keyword,
        "collected Xiaohongshu search results"
    );
    Ok(grouping)
}

/// Session-token client for a configured Xiaohongshu API gateway.
pub struct XiaohongshuApiClient {
    client: reqwest::Client,
    base_url: String,
    /// Session token sent as an Authorization header when present.
    token: Option<String>,
}

impl XiaohongshuApiClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("gleaner/0.1 (post-collection)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(str::to_string),
        })
    }
}

#[async_trait]
impl NoteSearch for XiaohongshuApiClient {
    async fn search_notes(&self, keyword: &str, limit: u32) -> Result<NoteSearchResponse> {
        let url = format!("{}/notes/search", self.base_url);
        let page_size = limit.to_string();

        debug!(keyword = keyword, "Xiaohongshu note search request");

        let mut request = self
            .client
            .get(&url)
            .query(&[("keyword", keyword), ("page_size", page_size.as_str())]);
        if let Some(ref token) = self.token {
            request = request.header("Authorization", token);
        }

        let response = request
            .send()
            .await
            .context("Xiaohongshu note search request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Xiaohongshu note search returned {status}: {body}");
        }

        response
            .json::<NoteSearchResponse>()
            .await
            .context("Failed to deserialize Xiaohongshu search response")
    }
}
