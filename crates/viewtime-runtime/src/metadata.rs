//! External video-metadata collaborator.
//!
//! The actual OAuth/HTTP transport lives outside this repository; the
//! runtime sees it only through [`VideoApi`]. What belongs here is the
//! in-scope plumbing around it: batching lookups at the 50-id API limit,
//! parsing ISO 8601 durations, mapping category ids and picking
//! thumbnails while normalizing API items into [`LikedRecord`]s.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;
use viewtime_core::duration::parse_iso8601_duration;
use viewtime_core::error::Result;
use viewtime_core::liked_models::{LikedRecord, VideoCategory, VideoType};

/// Maximum video ids per metadata lookup call.
pub const MAX_IDS_PER_CALL: usize = 50;

/// Thumbnail qualities in preference order.
const THUMBNAIL_QUALITIES: &[&str] = &["maxres", "high", "medium", "default"];

// ── Wire types ────────────────────────────────────────────────────────────────

/// One entry of the user's liked playlist.
#[derive(Debug, Clone)]
pub struct LikedPlaylistItem {
    pub video_id: String,
    /// When the video was liked, as reported by the playlist snippet.
    pub liked_at: Option<String>,
}

/// One page of the liked playlist.
#[derive(Debug, Clone)]
pub struct LikedPage {
    pub items: Vec<LikedPlaylistItem>,
    pub next_page_token: Option<String>,
}

/// Per-video metadata returned by the lookup endpoint.
#[derive(Debug, Clone, Default)]
pub struct ApiVideo {
    pub video_id: String,
    pub title: String,
    pub description: String,
    /// ISO 8601 duration string, e.g. `PT1M30S`.
    pub duration_iso: String,
    pub category_id: String,
    pub tags: Vec<String>,
    pub channel_id: String,
    pub channel_title: String,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
    /// Thumbnail URLs keyed by quality name.
    pub thumbnails: BTreeMap<String, String>,
}

// ── VideoApi ──────────────────────────────────────────────────────────────────

/// External liked-playlist and video-metadata lookup.
///
/// Implementations own authentication and transport; the runtime only
/// assumes the paging and batch-size conventions expressed here.
#[async_trait]
pub trait VideoApi: Send + Sync {
    /// Fetch one page of the user's liked playlist.
    async fn list_liked(&self, page_token: Option<&str>, max_results: u32) -> Result<LikedPage>;

    /// Fetch metadata for up to [`MAX_IDS_PER_CALL`] video ids.
    async fn fetch_videos(&self, ids: &[String]) -> Result<Vec<ApiVideo>>;
}

// ── Batch fetching ────────────────────────────────────────────────────────────

/// Result of a chunked metadata fetch.
#[derive(Debug, Default)]
pub struct MetadataFetch {
    pub videos: Vec<ApiVideo>,
    pub api_calls_made: u32,
    pub failed_batches: u32,
}

/// Fetch metadata for `ids` in chunks of at most [`MAX_IDS_PER_CALL`].
///
/// A failing batch is logged and skipped; its videos are simply absent
/// from the result. It never aborts the remaining batches.
pub async fn fetch_metadata(api: &dyn VideoApi, ids: &[String]) -> MetadataFetch {
    let mut fetch = MetadataFetch::default();

    for chunk in ids.chunks(MAX_IDS_PER_CALL) {
        fetch.api_calls_made += 1;
        match api.fetch_videos(chunk).await {
            Ok(videos) => fetch.videos.extend(videos),
            Err(e) => {
                warn!(error = %e, batch_size = chunk.len(), "metadata batch failed; skipping");
                fetch.failed_batches += 1;
            }
        }
    }

    fetch
}

// ── Normalization ─────────────────────────────────────────────────────────────

/// Normalize a playlist item plus its metadata into a [`LikedRecord`].
///
/// Duration is parsed from the ISO string (malformed strings become 0),
/// the category id is mapped to its display name (unknown ids become
/// `Other`), the best available thumbnail is picked, and videos at or
/// under 60 seconds are typed as shorts.
pub fn normalize_record(item: &LikedPlaylistItem, video: &ApiVideo, position: u32) -> LikedRecord {
    let duration_seconds = parse_iso8601_duration(&video.duration_iso);
    let category = VideoCategory::from_id(&video.category_id);
    let video_type = if duration_seconds <= 60 {
        VideoType::Short
    } else {
        VideoType::Regular
    };

    LikedRecord {
        video_id: video.video_id.clone(),
        title: video.title.clone(),
        description: video.description.clone(),
        duration_seconds,
        duration_iso: video.duration_iso.clone(),
        category_id: video.category_id.clone(),
        category_name: category.name().to_string(),
        video_type,
        tags: video.tags.clone(),
        thumbnail_url: best_thumbnail(&video.thumbnails),
        channel_id: video.channel_id.clone(),
        channel_title: video.channel_title.clone(),
        channel_url: format!("https://youtube.com/channel/{}", video.channel_id),
        subscriber_count: None,
        view_count: video.view_count,
        like_count: video.like_count,
        comment_count: video.comment_count,
        liked_at: item.liked_at.clone(),
        position_in_playlist: Some(position),
        extracted_keywords: Vec::new(),
        synced_at: Some(Utc::now()),
        updated_at: Some(Utc::now()),
    }
}

/// Best available thumbnail URL, by quality preference.
fn best_thumbnail(thumbnails: &BTreeMap<String, String>) -> Option<String> {
    THUMBNAIL_QUALITIES
        .iter()
        .find_map(|quality| thumbnails.get(*quality).cloned())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
