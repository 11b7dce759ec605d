use std::env;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// All credentials come from env vars (never hardcoded); the .env file is
/// loaded automatically at startup via dotenvy. Base URLs are overridable
/// for testing or alternate gateways. An empty credential means the
/// platform is not configured, and its collector runs the absent-client
/// path instead of failing.
pub struct Config {
    pub x_api_url: String,
    pub x_bearer_token: String,
    pub youtube_api_url: String,
    pub youtube_api_key: String,
    pub tiktok_api_url: String,
    pub tiktok_access_token: String,
    /// Xiaohongshu gateway URL — proprietary, so no public default.
    pub xiaohongshu_api_url: String,
    /// Optional session token sent as an Authorization header.
    pub xiaohongshu_token: String,
    /// Bilibili's endpoint is public; the override exists for testing.
    pub bilibili_api_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Ok(Self {
            x_api_url: env::var("X_API_URL")
                .unwrap_or_else(|_| crate::platforms::x::DEFAULT_API_URL.to_string()),
            x_bearer_token: env::var("X_BEARER_TOKEN").unwrap_or_default(),
            youtube_api_url: env::var("YOUTUBE_API_URL")
                .unwrap_or_else(|_| crate::platforms::youtube::DEFAULT_API_URL.to_string()),
            youtube_api_key: env::var("YOUTUBE_API_KEY").unwrap_or_default(),
            tiktok_api_url: env::var("TIKTOK_API_URL")
                .unwrap_or_else(|_| crate::platforms::tiktok::DEFAULT_API_URL.to_string()),
            tiktok_access_token: env::var("TIKTOK_ACCESS_TOKEN").unwrap_or_default(),
            xiaohongshu_api_url: env::var("XIAOHONGSHU_API_URL").unwrap_or_default(),
            xiaohongshu_token: env::var("XIAOHONGSHU_TOKEN").unwrap_or_default(),
            bilibili_api_url: env::var("BILIBILI_API_URL")
                .unwrap_or_else(|_| crate::platforms::bilibili::DEFAULT_API_URL.to_string()),
        })
    }
}
