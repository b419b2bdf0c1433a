//! Data model for the liked-videos analytics pipeline.
//!
//! Liked videos arrive as a flat sample of API records; the analytics
//! snapshot is assembled from six independent statistics blocks keyed by
//! a validated sample size.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Enums ─────────────────────────────────────────────────────────────────────

/// Broad video format classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoType {
    Regular,
    Short,
    Live,
    Premiere,
}

impl Default for VideoType {
    fn default() -> Self {
        VideoType::Regular
    }
}

/// Common YouTube video categories.
///
/// Serialised with their display names so stored snapshots stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VideoCategory {
    Music,
    Gaming,
    Entertainment,
    #[serde(rename = "News & Politics")]
    News,
    #[serde(rename = "Howto & Style")]
    Howto,
    Education,
    #[serde(rename = "Science & Technology")]
    Science,
    #[serde(rename = "Nonprofits & Activism")]
    Nonprofits,
    Comedy,
    #[serde(rename = "People & Blogs")]
    People,
    #[serde(rename = "Pets & Animals")]
    Pets,
    #[serde(rename = "Travel & Events")]
    Travel,
    #[serde(rename = "Autos & Vehicles")]
    Autos,
    Sports,
    #[serde(rename = "Film & Animation")]
    Film,
    Other,
}

impl VideoCategory {
    /// Coerce a free-text category name; anything unrecognised is `Other`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Music" => VideoCategory::Music,
            "Gaming" => VideoCategory::Gaming,
            "Entertainment" => VideoCategory::Entertainment,
            "News & Politics" => VideoCategory::News,
            "Howto & Style" => VideoCategory::Howto,
            "Education" => VideoCategory::Education,
            "Science & Technology" => VideoCategory::Science,
            "Nonprofits & Activism" => VideoCategory::Nonprofits,
            "Comedy" => VideoCategory::Comedy,
            "People & Blogs" => VideoCategory::People,
            "Pets & Animals" => VideoCategory::Pets,
            "Travel & Events" => VideoCategory::Travel,
            "Autos & Vehicles" => VideoCategory::Autos,
            "Sports" => VideoCategory::Sports,
            "Film & Animation" => VideoCategory::Film,
            _ => VideoCategory::Other,
        }
    }

    /// Map a numeric YouTube category id to its name.
    pub fn from_id(id: &str) -> Self {
        match id {
            "1" => VideoCategory::Film,
            "2" => VideoCategory::Autos,
            "10" => VideoCategory::Music,
            "15" => VideoCategory::Pets,
            "17" => VideoCategory::Sports,
            "19" => VideoCategory::Travel,
            "20" => VideoCategory::Gaming,
            "22" => VideoCategory::People,
            "23" => VideoCategory::Comedy,
            "24" => VideoCategory::Entertainment,
            "25" => VideoCategory::News,
            "26" => VideoCategory::Howto,
            "27" => VideoCategory::Education,
            "28" => VideoCategory::Science,
            "29" => VideoCategory::Nonprofits,
            _ => VideoCategory::Other,
        }
    }

    /// The display name, matching the serialised form.
    pub fn name(&self) -> &'static str {
        match self {
            VideoCategory::Music => "Music",
            VideoCategory::Gaming => "Gaming",
            VideoCategory::Entertainment => "Entertainment",
            VideoCategory::News => "News & Politics",
            VideoCategory::Howto => "Howto & Style",
            VideoCategory::Education => "Education",
            VideoCategory::Science => "Science & Technology",
            VideoCategory::Nonprofits => "Nonprofits & Activism",
            VideoCategory::Comedy => "Comedy",
            VideoCategory::People => "People & Blogs",
            VideoCategory::Pets => "Pets & Animals",
            VideoCategory::Travel => "Travel & Events",
            VideoCategory::Autos => "Autos & Vehicles",
            VideoCategory::Sports => "Sports",
            VideoCategory::Film => "Film & Animation",
            VideoCategory::Other => "Other",
        }
    }
}

/// Part-of-day quadrant derived from the peak liking hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPeriod {
    /// Bucket an hour of day (0-23) into its quadrant.
    pub fn from_hour(hour: u8) -> Self {
        match hour {
            6..=11 => DayPeriod::Morning,
            12..=17 => DayPeriod::Afternoon,
            18..=23 => DayPeriod::Evening,
            _ => DayPeriod::Night,
        }
    }
}

// ── Records ───────────────────────────────────────────────────────────────────

/// Information about a YouTube channel, carried alongside liked videos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub channel_id: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub channel_url: String,
    #[serde(default)]
    pub subscriber_count: Option<u64>,
}

/// A normalized liked-video record.
///
/// This is the strictly-typed boundary form: every downstream consumer
/// treats the fields as already validated. Optional/defaulted fields model
/// the metadata the API may omit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikedRecord {
    pub video_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration_seconds: u32,
    #[serde(default)]
    pub duration_iso: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub video_type: VideoType,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub channel_url: String,
    #[serde(default)]
    pub subscriber_count: Option<u64>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub comment_count: Option<u64>,
    /// When the user liked the video, as reported by the API.
    #[serde(default)]
    pub liked_at: Option<String>,
    #[serde(default)]
    pub position_in_playlist: Option<u32>,
    /// Keywords extracted from title + description at sync time.
    #[serde(default)]
    pub extracted_keywords: Vec<String>,
    #[serde(default)]
    pub synced_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl LikedRecord {
    /// Resolved category, coercing unknown names to `Other`.
    pub fn category(&self) -> VideoCategory {
        VideoCategory::from_name(&self.category_name)
    }
}

// ── Analytics blocks ──────────────────────────────────────────────────────────

/// One keyword with its aggregate frequency, ordered descending by count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: u32,
}

/// Keyword frequency analysis across the sampled videos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub user_id: String,
    pub sample_size: u32,
    /// Top keywords across all sampled videos, capped at 50.
    pub top_keywords: Vec<KeywordCount>,
    /// Per-category top-10 keyword lists.
    pub keyword_categories: BTreeMap<VideoCategory, Vec<String>>,
    pub analysis_date: DateTime<Utc>,
    pub total_unique_keywords: u32,
    pub average_keywords_per_video: f64,
}

/// Category distribution of the sampled videos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStats {
    pub user_id: String,
    pub sample_size: u32,
    pub category_counts: BTreeMap<VideoCategory, u32>,
    pub category_percentages: BTreeMap<VideoCategory, f64>,
    /// Total seconds of liked content per category.
    pub category_total_duration: BTreeMap<VideoCategory, u64>,
    /// Categories ordered descending by like count.
    pub top_categories: Vec<VideoCategory>,
    pub analysis_date: DateTime<Utc>,
}

/// Channel distribution of the sampled videos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelStats {
    pub user_id: String,
    pub sample_size: u32,
    pub channel_like_counts: BTreeMap<String, u32>,
    pub channel_info_map: BTreeMap<String, ChannelInfo>,
    /// Channel ids ordered descending by like count, capped at 20.
    pub top_channels: Vec<String>,
    pub total_unique_channels: u32,
    pub average_likes_per_channel: f64,
    /// Modified-entropy concentration measure `-Σ p·√p`; higher values
    /// indicate a more concentrated channel preference. Not Shannon
    /// entropy; the formula is preserved for compatibility with stored
    /// historical scores.
    pub channel_diversity_score: f64,
    pub analysis_date: DateTime<Utc>,
}

/// Video-length distribution of the sampled videos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoLengthStats {
    pub user_id: String,
    pub sample_size: u32,
    /// Fixed buckets; every key present even at zero.
    pub length_buckets: BTreeMap<String, u32>,
    pub length_percentages: BTreeMap<String, f64>,
    pub average_length: f64,
    pub median_length: f64,
    pub shortest_video: u32,
    pub longest_video: u32,
    pub total_duration: u64,
    pub shorts_count: u32,
    pub regular_count: u32,
    pub shorts_percentage: f64,
    pub analysis_date: DateTime<Utc>,
}

/// Temporal patterns in liking behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikedContentTrends {
    pub user_id: String,
    pub sample_size: u32,
    /// `"2024-01"` style month keys.
    pub likes_by_month: BTreeMap<String, u32>,
    /// `"Monday"` style weekday keys.
    pub likes_by_day_of_week: BTreeMap<String, u32>,
    pub likes_by_hour: BTreeMap<u8, u32>,
    /// Quadrant of the peak liking hour, absent when no record carried a
    /// parseable timestamp.
    pub most_active_period: Option<DayPeriod>,
    /// Average likes per day over the observed date range.
    pub liking_frequency: f64,
    pub analysis_date: DateTime<Utc>,
    pub date_range_start: Option<DateTime<Utc>>,
    pub date_range_end: Option<DateTime<Utc>>,
}

/// Shorts-vs-regular comparison of the sampled videos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortsAnalysis {
    pub user_id: String,
    pub sample_size: u32,
    pub total_shorts: u32,
    pub total_regular: u32,
    pub shorts_percentage: f64,
    pub avg_shorts_duration: f64,
    pub avg_regular_duration: f64,
    pub shorts_categories: BTreeMap<VideoCategory, u32>,
    pub regular_categories: BTreeMap<VideoCategory, u32>,
    pub shorts_channels: BTreeMap<String, u32>,
    pub regular_channels: BTreeMap<String, u32>,
    pub analysis_date: DateTime<Utc>,
}

/// Complete analytics package for a user's liked videos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikedVideosAnalytics {
    pub user_id: String,
    pub sample_size: u32,

    pub keyword_analysis: KeywordAnalysis,
    pub category_stats: CategoryStats,
    pub channel_stats: ChannelStats,
    pub length_stats: VideoLengthStats,
    pub content_trends: LikedContentTrends,
    pub shorts_analysis: ShortsAnalysis,

    /// Total liked videos stored for the user, independent of the sample.
    pub total_liked_videos: u32,
    pub analysis_date: DateTime<Utc>,
    #[serde(default)]
    pub last_sync_date: Option<DateTime<Utc>>,

    /// Sampled items with a non-empty title.
    pub videos_with_metadata: u32,
    /// Invariant: `videos_with_metadata + videos_missing_data == sample_size`.
    pub videos_missing_data: u32,
    /// Percentage of the sampled window with a non-empty title.
    pub data_completeness_score: f64,
}

// ── Sync bookkeeping ──────────────────────────────────────────────────────────

/// Persisted status of liked-videos synchronization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncStatus {
    pub user_id: String,
    #[serde(default)]
    pub last_sync_attempt: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_successful_sync: Option<DateTime<Utc>>,
    #[serde(default)]
    pub videos_fetched: u32,
    #[serde(default)]
    pub videos_processed: u32,
    #[serde(default)]
    pub videos_failed: u32,
    #[serde(default)]
    pub last_error: Option<String>,
    #[serde(default)]
    pub consecutive_failures: u32,
    #[serde(default)]
    pub api_calls_made: u32,
    #[serde(default)]
    pub is_syncing: bool,
    #[serde(default = "default_sample_size")]
    pub preferred_sample_size: u32,
}

fn default_sample_size() -> u32 {
    100
}

impl SyncStatus {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            last_sync_attempt: None,
            last_successful_sync: None,
            videos_fetched: 0,
            videos_processed: 0,
            videos_failed: 0,
            last_error: None,
            consecutive_failures: 0,
            api_calls_made: 0,
            is_syncing: false,
            preferred_sample_size: default_sample_size(),
        }
    }
}

/// Per-user preferences persisted between syncs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default = "default_sample_size")]
    pub preferred_sample_size: u32,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            preferred_sample_size: default_sample_size(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
