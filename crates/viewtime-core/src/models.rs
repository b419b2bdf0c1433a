use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a watch event reached the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewSource {
    /// Served by a recommendation or autoplay surface.
    Algorithmic,
    /// Reached through a deliberate action (search, subscription, playlist).
    Intentional,
}

impl ViewSource {
    /// Human-readable fallback label used when no source detail is present.
    pub fn label(&self) -> &'static str {
        match self {
            ViewSource::Algorithmic => "Algorithmic",
            ViewSource::Intentional => "Intentional",
        }
    }
}

/// A single playback occurrence parsed from a Takeout export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchEvent {
    /// Owner of this event.
    pub user_id: String,
    /// YouTube video identifier extracted from the record URL.
    pub video_id: String,
    /// Video title with the export wrapper phrase removed.
    pub title: String,
    /// Channel attribution, or `"Unknown channel"` when absent.
    pub channel_title: String,
    /// UTC timestamp of the playback (second precision).
    pub watched_at: DateTime<Utc>,
    /// Provenance classification.
    pub source: ViewSource,
    /// Free-text label of the matched provenance rule, when one matched.
    #[serde(default)]
    pub source_detail: Option<String>,
    /// Original record URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Playback duration in seconds, unknown unless separately enriched.
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    /// Whether the URL identifies a short-form video.
    #[serde(default)]
    pub is_short: bool,
}

/// A maximal run of watch events separated by gaps within the inactivity
/// threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchSession {
    /// Owner of this session.
    pub user_id: String,
    /// Timestamp of the first event in the session.
    pub start_time: DateTime<Utc>,
    /// Timestamp of the last event in the session.
    pub end_time: DateTime<Utc>,
    /// Video ids in playback order.
    pub video_ids: Vec<String>,
    /// Number of short-form events in the session.
    pub shorts_count: u32,
    /// Total number of events in the session.
    pub total_events: u32,
    /// Heuristic duration estimate, not wall-clock `end - start`.
    pub estimated_duration_seconds: u32,
}

impl WatchSession {
    /// Estimated duration in minutes.
    pub fn estimated_duration_minutes(&self) -> f64 {
        f64::from(self.estimated_duration_seconds) / 60.0
    }
}

/// A video watched more than once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepeatView {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    /// Always >= 2.
    pub watch_count: u32,
    /// Most recent playback of this video.
    pub last_watched_at: DateTime<Utc>,
}

/// One entry of the recommendation breakdown, ordered descending by count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceBreakdown {
    /// Source detail label, or the generic `"Algorithmic"`/`"Intentional"`
    /// fallback when the export omitted detail.
    pub label: String,
    pub count: u32,
}

/// The persisted watch-history analytics snapshot.
///
/// Produced once per upload and fully replaces any prior snapshot for the
/// user. Share fields are fractions of total events (0 for empty input);
/// the session-duration histogram always contains every bucket key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchHistoryAnalytics {
    pub user_id: String,
    pub generated_at: DateTime<Utc>,

    // Basic totals.
    pub total_events: u64,
    pub unique_videos: u64,
    pub unique_channels: u64,

    // Session-derived averages.
    pub average_session_duration_minutes: f64,
    pub average_videos_per_session: f64,
    pub average_shorts_streak_minutes: f64,

    // Viewing behaviour.
    pub algorithmic_view_share: f64,
    pub intentional_view_share: f64,
    pub recommendation_breakdown: Vec<SourceBreakdown>,

    // Repeat viewing.
    pub repeat_views: Vec<RepeatView>,

    // Time patterns. Heatmap weekday index is Monday = 0; only populated
    // cells are present.
    pub heatmap: BTreeMap<u8, BTreeMap<u8, u32>>,
    pub daily_distribution: BTreeMap<String, u32>,

    // Summary metrics.
    pub shorts_share: f64,
    pub daily_average_minutes: f64,
    pub weekly_minutes: f64,
    pub session_distribution: BTreeMap<String, u32>,
    pub longest_session_minutes: f64,
    pub shorts_total_minutes: f64,
    pub algorithmic_minutes: f64,
    pub intentional_minutes: f64,
}

/// Lifecycle state of a user's watch-history ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingState {
    Idle,
    Processing,
    Completed,
    Error,
}

/// The persisted status record consumed by presentation layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchHistoryStatus {
    pub processing_state: ProcessingState,
    #[serde(default)]
    pub last_uploaded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_events: u64,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Populated when `processing_state` is `error`.
    #[serde(default)]
    pub error_message: Option<String>,
}

impl Default for WatchHistoryStatus {
    fn default() -> Self {
        Self {
            processing_state: ProcessingState::Idle,
            last_uploaded_at: None,
            total_events: 0,
            updated_at: None,
            error_message: None,
        }
    }
}

// ── Rounding helpers ──────────────────────────────────────────────────────────

/// Round to 2 decimal places for stable display output.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 3 decimal places, used for share/ratio fields.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

// ── Tests ─────────────────────────────────────────────────────────────────────
