// Composition tests — collecting from two platforms, merging, and
// serializing the way the CLI does, without any network access.

use std::sync::atomic::AtomicUsize;

use async_trait::async_trait;
use serde_json::{Map, Value};

use gleaner::platforms::{bilibili, x};
use gleaner::post::{merge, Grouping};

struct XDouble(&'static str, AtomicUsize);

#[async_trait]
impl x::RecentSearch for XDouble {
    async fn search_recent(&self, _query: &str, _max_results: u32) -> anyhow::Result<x::SearchResponse> {
        self.1.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(serde_json::from_str(self.0)?)
    }
}

struct BilibiliDouble(&'static str);

#[async_trait]
impl bilibili::UploaderVideos for BilibiliDouble {
    async fn uploader_videos(
        &self,
        _uid: &str,
        _limit: u32,
    ) -> anyhow::Result<bilibili::SpaceSearchResponse> {
        Ok(serde_json::from_str(self.0)?)
    }
}

/// The CLI's export shape: user id → array of to_mapping() objects.
fn export(grouping: &Grouping) -> Value {
    let mut root = Map::new();
    for (user_id, posts) in grouping {
        let exported: Vec<Value> = posts
            .iter()
            .map(|post| Value::Object(post.to_mapping()))
            .collect();
        root.insert(user_id.clone(), Value::Array(exported));
    }
    Value::Object(root)
}

#[tokio::test]
async fn two_platform_collections_merge_and_serialize() {
    let x_double = XDouble(
        r#"{
            "data": [
                {"id": "1", "text": "你好, world", "author_id": "555"},
                {"id": "2", "text": "second", "author_id": "777"}
            ]
        }"#,
        AtomicUsize::new(0),
    );
    let bilibili_double = BilibiliDouble(
        r#"{"data": {"list": {"vlist": [{"bvid": "BV1", "title": "标题", "play": 10}]}}}"#,
    );

    let from_x = x::collect(Some(&x_double), "q", 10).await.unwrap();
    let from_bilibili = bilibili::collect(Some(&bilibili_double), "555", 10)
        .await
        .unwrap();

    let merged = merge([from_x, from_bilibili]);

    // "555" appears on both platforms: X post first (argument order), then
    // the Bilibili video. "777" comes only from X.
    assert_eq!(merged.len(), 2);
    let both: Vec<&str> = merged["555"].iter().map(|p| p.post_id.as_str()).collect();
    assert_eq!(both, ["1", "BV1"]);
    assert_eq!(merged["777"].len(), 1);

    let json = serde_json::to_string_pretty(&export(&merged)).unwrap();

    // Non-ASCII text stays literal, never \u-escaped
    assert!(json.contains("你好"));
    assert!(json.contains("标题"));
    assert!(!json.contains("\\u"));

    // Exported post objects keep the declaration key order
    let post_id_at = json.find("\"post_id\"").unwrap();
    let user_id_at = json.find("\"user_id\"").unwrap();
    let content_at = json.find("\"content\"").unwrap();
    let metadata_at = json.find("\"metadata\"").unwrap();
    assert!(post_id_at < user_id_at && user_id_at < content_at && content_at < metadata_at);
}

#[tokio::test]
async fn merging_an_empty_collection_is_a_noop() {
    let bilibili_double = BilibiliDouble(r#"{"data": null}"#);
    let empty = bilibili::collect(Some(&bilibili_double), "555", 10)
        .await
        .unwrap();

    let x_double = XDouble(
        r#"{"data": [{"id": "1", "text": "t", "author_id": "u"}]}"#,
        AtomicUsize::new(0),
    );
    let posts = x::collect(Some(&x_double), "q", 10).await.unwrap();

    let merged = merge([empty, posts.clone()]);
    assert_eq!(merged, posts);
}
