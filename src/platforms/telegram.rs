// Telegram channel message collection.
//
// The client seam is an externally authenticated MTProto session — this
// crate never performs a login itself, which is also why this module sits
// behind the `telegram` cargo feature. Messages without a resolvable
// sender (service messages, anonymous channel posts) are skipped.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::post::{Grouping, Metadata, Post};

/// One message from a channel history listing, as surfaced by the session.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: i64,
    pub sender_id: Option<i64>,
    /// Text payload; media-only messages have none.
    pub text: Option<String>,
    pub date: DateTime<Utc>,
    /// View counter — absent outside broadcast channels.
    pub views: Option<i64>,
}

/// The one operation the Telegram adapter needs from its session.
#[async_trait]
pub trait ChannelHistory: Send + Sync {
    async fn channel_messages(&self, channel: &str, limit: u32) -> Result<Vec<Message>>;
}

/// Collect messages from `channel`, grouped by sender id.
pub async fn collect(
    client: Option<&dyn ChannelHistory>,
    channel: &str,
    limit: u32,
) -> Result<Grouping> {
    let Some(client) = client else {
        warn!("no Telegram session supplied, returning empty grouping");
        return Ok(Grouping::new());
    };

    let messages = client.channel_messages(channel, limit).await?;

    let mut grouping = Grouping::new();
    for message in messages {
        let Some(sender_id) = message.sender_id else {
            continue;
        };

        let mut metadata = Metadata::new();
        metadata.insert(
            "date".to_string(),
            message
                .date
                .to_rfc3339_opts(SecondsFormat::Secs, true)
                .into(),
        );
        metadata.insert("views".to_string(), message.views.into());

        let content = message.text.map(Value::String).unwrap_or(Value::Null);
        let post = Post::new(
            message.id.to_string(),
            sender_id.to_string(),
            content,
            metadata,
        );
        grouping.entry(post.user_id.clone()).or_default().push(post);
    }

    debug!(
        users = grouping.len(),
        channel = channel,
        "collected Telegram channel history"
    );
    Ok(grouping)
}
