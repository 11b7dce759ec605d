use std::fs;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use tracing::info;

use gleaner::config::Config;
use gleaner::platforms;
use gleaner::post::Grouping;

/// Gleaner: social media post collection, normalized by author.
///
/// Each subcommand performs exactly one fetch against a single platform
/// and emits the collected posts as JSON grouped by author id. Platforms
/// without configured credentials produce an empty result and a stderr
/// diagnostic rather than an error, so a batch caller can run every
/// collector unconditionally.
#[derive(Parser)]
#[command(name = "gleaner", version, about)]
struct Cli {
    /// Output file path, or `-` for stdout
    #[arg(long, global = true, default_value = "-")]
    out: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search recent posts on X (Twitter)
    X {
        /// Search query string
        query: String,

        /// Maximum number of posts to fetch
        #[arg(long, default_value = "100")]
        max_results: u32,
    },

    /// Fetch messages from a Telegram channel
    Telegram {
        /// Channel name or id
        channel: String,

        /// Number of messages to retrieve
        #[arg(long, default_value = "100")]
        limit: u32,
    },

    /// List recent videos from a YouTube channel
    Youtube {
        /// Channel id (e.g. UC...)
        channel_id: String,

        /// Number of videos to fetch
        #[arg(long, default_value = "50")]
        max_results: u32,
    },

    /// Search TikTok videos
    Tiktok {
        /// Hashtag or keyword to search
        query: String,

        /// Number of videos to fetch
        #[arg(long, default_value = "50")]
        limit: u32,
    },

    /// Search Xiaohongshu notes
    Xiaohongshu {
        /// Keyword to search notes for
        keyword: String,

        /// Maximum notes to fetch
        #[arg(long, default_value = "50")]
        limit: u32,
    },

    /// List an uploader's videos on Bilibili
    Bilibili {
        /// Uploader id (UID)
        uid: String,

        /// Number of videos to retrieve
        #[arg(long, default_value = "50")]
        limit: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Diagnostics go to stderr so stdout stays clean for JSON output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gleaner=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let grouping = match cli.command {
        Commands::X { query, max_results } => {
            let client = x_client(&config)?;
            platforms::x::collect(
                client.as_ref().map(|c| c as &dyn platforms::x::RecentSearch),
                &query,
                max_results,
            )
            .await?
        }

        Commands::Telegram { channel, limit } => collect_telegram(&channel, limit).await?,

        Commands::Youtube {
            channel_id,
            max_results,
        } => {
            let client = youtube_client(&config)?;
            platforms::youtube::collect(
                client
                    .as_ref()
                    .map(|c| c as &dyn platforms::youtube::ChannelSearch),
                &channel_id,
                max_results,
            )
            .await?
        }

        Commands::Tiktok { query, limit } => {
            let client = tiktok_client(&config)?;
            platforms::tiktok::collect(
                client.as_ref().map(|c| c as &dyn platforms::tiktok::VideoSearch),
                &query,
                limit,
            )
            .await?
        }

        Commands::Xiaohongshu { keyword, limit } => {
            let client = xiaohongshu_client(&config)?;
            platforms::xiaohongshu::collect(
                client
                    .as_ref()
                    .map(|c| c as &dyn platforms::xiaohongshu::NoteSearch),
                &keyword,
                limit,
            )
            .await?
        }

        Commands::Bilibili { uid, limit } => {
            let client = platforms::bilibili::BilibiliApiClient::new(&config.bilibili_api_url)?;
            platforms::bilibili::collect(
                Some(&client as &dyn platforms::bilibili::UploaderVideos),
                &uid,
                limit,
            )
            .await?
        }
    };

    write_output(&grouping, &cli.out)
}

/// Build an X client when a bearer token is configured.
fn x_client(config: &Config) -> Result<Option<platforms::x::XApiClient>> {
    if config.x_bearer_token.is_empty() {
        return Ok(None);
    }
    Ok(Some(platforms::x::XApiClient::new(
        &config.x_api_url,
        &config.x_bearer_token,
    )?))
}

/// Build a YouTube client when an API key is configured.
fn youtube_client(config: &Config) -> Result<Option<platforms::youtube::YouTubeApiClient>> {
    if config.youtube_api_key.is_empty() {
        return Ok(None);
    }
    Ok(Some(platforms::youtube::YouTubeApiClient::new(
        &config.youtube_api_url,
        &config.youtube_api_key,
    )?))
}

/// Build a TikTok client when an access token is configured.
fn tiktok_client(config: &Config) -> Result<Option<platforms::tiktok::TikTokApiClient>> {
    if config.tiktok_access_token.is_empty() {
        return Ok(None);
    }
    Ok(Some(platforms::tiktok::TikTokApiClient::new(
        &config.tiktok_api_url,
        &config.tiktok_access_token,
    )?))
}

/// Build a Xiaohongshu client when a gateway URL is configured.
fn xiaohongshu_client(
    config: &Config,
) -> Result<Option<platforms::xiaohongshu::XiaohongshuApiClient>> {
    if config.xiaohongshu_api_url.is_empty() {
        return Ok(None);
    }
    let token = if config.xiaohongshu_token.is_empty() {
        None
    } else {
        Some(config.xiaohongshu_token.as_str())
    };
    Ok(Some(platforms::xiaohongshu::XiaohongshuApiClient::new(
        &config.xiaohongshu_api_url,
        token,
    )?))
}

/// Telegram session construction is external — no MTProto login happens
/// here, so this always runs the adapter's absent-client path.
#[cfg(feature = "telegram")]
async fn collect_telegram(channel: &str, limit: u32) -> Result<Grouping> {
    platforms::telegram::collect(None, channel, limit).await
}

#[cfg(not(feature = "telegram"))]
async fn collect_telegram(_channel: &str, _limit: u32) -> Result<Grouping> {
    tracing::warn!("telegram support not compiled in, returning empty grouping");
    Ok(Grouping::new())
}

/// Serialize the grouping as pretty JSON — an object keyed by user id with
/// arrays of exported posts. Non-ASCII text is written literally.
fn write_output(grouping: &Grouping, out: &str) -> Result<()> {
    let mut root = Map::new();
    for (user_id, posts) in grouping {
        let exported: Vec<Value> = posts
            .iter()
            .map(|post| Value::Object(post.to_mapping()))
            .collect();
        root.insert(user_id.clone(), Value::Array(exported));
    }
    let json = serde_json::to_string_pretty(&Value::Object(root))?;

    if out == "-" {
        println!("{json}");
    } else {
        fs::write(out, json).with_context(|| format!("Failed to write output to {out}"))?;
        info!(
            path = out,
            users = grouping.len(),
            posts = grouping.values().map(Vec::len).sum::<usize>(),
            "wrote collection output"
        );
    }
    Ok(())
}
