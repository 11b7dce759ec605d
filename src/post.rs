// Normalized post model — the shape every platform adapter emits.
//
// A Post carries the platform-native id, the author it is attributed to,
// the primary textual payload, and an open per-platform metadata mapping.
// Groupings collect posts per author id in source iteration order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single metadata value. Platforms surface strings, integers, floats,
/// lists of tag strings, or explicit nulls — nothing deeper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Str(String),
    Int(i64),
    Float(f64),
    StrList(Vec<String>),
    Null,
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Str(value)
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Str(value.to_string())
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        MetaValue::Int(value)
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        MetaValue::Float(value)
    }
}

impl From<Vec<String>> for MetaValue {
    fn from(value: Vec<String>) -> Self {
        MetaValue::StrList(value)
    }
}

/// Absent source values become explicit nulls — key presence mirrors what
/// the platform emits.
impl<T: Into<MetaValue>> From<Option<T>> for MetaValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(MetaValue::Null)
    }
}

impl From<MetaValue> for Value {
    fn from(value: MetaValue) -> Self {
        match value {
            MetaValue::Str(s) => Value::String(s),
            MetaValue::Int(n) => Value::Number(n.into()),
            // Non-finite floats have no JSON form; map them to null.
            MetaValue::Float(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            MetaValue::StrList(items) => {
                Value::Array(items.into_iter().map(Value::String).collect())
            }
            MetaValue::Null => Value::Null,
        }
    }
}

/// Platform-specific post attributes, keyed by name.
pub type Metadata = BTreeMap<String, MetaValue>;

/// One normalized social media item — post, message, video, or note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Platform-native identifier, unique within its platform only.
    pub post_id: String,
    /// Author/uploader/channel the post is attributed to.
    pub user_id: String,
    /// Primary textual payload. A JSON string for every current platform,
    /// null where the source has no text (Telegram media-only messages);
    /// open-ended so a future platform can carry structured content.
    pub content: Value,
    pub metadata: Metadata,
}

impl Post {
    pub fn new(
        post_id: impl Into<String>,
        user_id: impl Into<String>,
        content: Value,
        metadata: Metadata,
    ) -> Self {
        Self {
            post_id: post_id.into(),
            user_id: user_id.into(),
            content,
            metadata,
        }
    }

    /// Export as a plain string-keyed mapping with keys `post_id`,
    /// `user_id`, `content`, `metadata`, in that order. Feeding the four
    /// entries back through `new` reconstructs an equal Post.
    pub fn to_mapping(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("post_id".to_string(), Value::String(self.post_id.clone()));
        map.insert("user_id".to_string(), Value::String(self.user_id.clone()));
        map.insert("content".to_string(), self.content.clone());
        map.insert(
            "metadata".to_string(),
            Value::Object(
                self.metadata
                    .iter()
                    .map(|(key, value)| (key.clone(), Value::from(value.clone())))
                    .collect(),
            ),
        );
        map
    }
}

/// Posts grouped by author id. Key order carries no meaning; each list
/// preserves source iteration order.
pub type Grouping = BTreeMap<String, Vec<Post>>;

/// Merge several groupings into one. Post lists are concatenated per user
/// id in argument order — never deduplicated, never reordered. An empty
/// input yields an empty grouping.
pub fn merge<I>(sources: I) -> Grouping
where
    I: IntoIterator<Item = Grouping>,
{
    let mut merged = Grouping::new();
    for source in sources {
        for (user_id, posts) in source {
            merged.entry(user_id).or_default().extend(posts);
        }
    }
    merged
}
