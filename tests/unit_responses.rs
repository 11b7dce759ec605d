// Wire-shape tests for the platform response types.
//
// Verifies serde deserialization of synthetic platform JSON — optional
// fields, camelCase renames, numeric id coercion, and the nested
// envelopes — all without network access.

use gleaner::platforms::{bilibili, tiktok, x, xiaohongshu, youtube};

// ============================================================
// X
// ============================================================

#[test]
fn x_response_without_data_key() {
    let resp: x::SearchResponse = serde_json::from_str(r#"{"meta": {"result_count": 0}}"#).unwrap();
    assert!(resp.data.is_none());
}

#[test]
fn x_tweet_with_all_fields() {
    let json = r#"{
        "data": [{
            "id": "1234567890",
            "text": "text of the tweet",
            "author_id": "987654321",
            "created_at": "2025-01-01T12:00:00Z",
            "lang": "en",
            "entities": {"hashtags": [{"tag": "example"}, {"tag": "rust"}]}
        }]
    }"#;
    let resp: x::SearchResponse = serde_json::from_str(json).unwrap();
    let tweets = resp.data.unwrap();
    assert_eq!(tweets[0].id, "1234567890");
    assert_eq!(tweets[0].author_id, "987654321");
    assert_eq!(tweets[0].lang.as_deref(), Some("en"));
    let entities = tweets[0].entities.as_ref().unwrap();
    assert_eq!(entities.hashtags.as_ref().unwrap().len(), 2);
}

#[test]
fn x_tweet_minimal() {
    let json = r#"{"data": [{"id": "1", "text": "t", "author_id": "2"}]}"#;
    let resp: x::SearchResponse = serde_json::from_str(json).unwrap();
    let tweets = resp.data.unwrap();
    assert!(tweets[0].created_at.is_none());
    assert!(tweets[0].lang.is_none());
    assert!(tweets[0].entities.is_none());
}

// ============================================================
// YouTube
// ============================================================

#[test]
fn youtube_item_without_video_id() {
    let json = r#"{
        "items": [{
            "id": {"kind": "youtube#channel", "channelId": "UC1"},
            "snippet": {"title": "t", "publishedAt": "2025-01-01T00:00:00Z"}
        }]
    }"#;
    let resp: youtube::SearchListResponse = serde_json::from_str(json).unwrap();
    assert!(resp.items[0].id.video_id.is_none());
}

#[test]
fn youtube_empty_items_default() {
    let resp: youtube::SearchListResponse = serde_json::from_str(r#"{}"#).unwrap();
    assert!(resp.items.is_empty());
}

// ============================================================
// TikTok
// ============================================================

#[test]
fn tiktok_numeric_ids_coerce_to_strings() {
    let json = r#"{
        "data": [{
            "id": 7301234567890,
            "author": {"id": 9876543210},
            "desc": "Caption",
            "createTime": 1735732800,
            "stats": {"diggCount": 42}
        }]
    }"#;
    let resp: tiktok::VideoSearchResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.data[0].id, "7301234567890");
    assert_eq!(resp.data[0].author.id, "9876543210");
    assert_eq!(resp.data[0].create_time, Some(1735732800));
    assert_eq!(resp.data[0].stats.as_ref().unwrap().digg_count, Some(42));
}

#[test]
fn tiktok_string_ids_pass_through() {
    let json = r#"{"data": [{"id": "abc", "author": {"id": "u1"}}]}"#;
    let resp: tiktok::VideoSearchResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.data[0].id, "abc");
    assert!(resp.data[0].desc.is_none());
    assert!(resp.data[0].stats.is_none());
}

// ============================================================
// Xiaohongshu
// ============================================================

#[test]
fn xiaohongshu_note_fields() {
    let json = r#"{
        "data": [
            {"id": "5f123456", "user_id": "u789", "title": "Title of note", "likes": 100, "comments": 5},
            {"id": 99887766, "user_id": 12345}
        ]
    }"#;
    let resp: xiaohongshu::NoteSearchResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.data[0].id, "5f123456");
    assert_eq!(resp.data[0].likes, Some(100));
    assert_eq!(resp.data[1].id, "99887766");
    assert_eq!(resp.data[1].user_id, "12345");
    assert!(resp.data[1].title.is_none());
}

// ============================================================
// Bilibili
// ============================================================

#[test]
fn bilibili_full_envelope() {
    let json = r#"{
        "code": 0,
        "data": {
            "list": {
                "vlist": [
                    {"bvid": "BV1ab411c7", "title": "Video title", "play": 1000, "like": 10, "video_review": 50}
                ]
            }
        }
    }"#;
    let resp: bilibili::SpaceSearchResponse = serde_json::from_str(json).unwrap();
    let list = resp.data.unwrap().list.unwrap();
    assert_eq!(list.vlist[0].bvid, "BV1ab411c7");
    assert_eq!(list.vlist[0].play, Some(1000));
    assert_eq!(list.vlist[0].video_review, Some(50));
}

#[test]
fn bilibili_counts_may_be_absent() {
    let json = r#"{"data": {"list": {"vlist": [{"bvid": "BV2", "title": "t"}]}}}"#;
    let resp: bilibili::SpaceSearchResponse = serde_json::from_str(json).unwrap();
    let list = resp.data.unwrap().list.unwrap();
    assert!(list.vlist[0].play.is_none());
    assert!(list.vlist[0].like.is_none());
    assert!(list.vlist[0].video_review.is_none());
}

#[test]
fn bilibili_null_data() {
    let resp: bilibili::SpaceSearchResponse = serde_json::from_str(r#"{"data": null}"#).unwrap();
    assert!(resp.data.is_none());
}
