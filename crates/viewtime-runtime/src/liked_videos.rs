//! Liked-videos storage and sync orchestration.
//!
//! [`LikedVideosStore`] is the typed repository over the liked-videos
//! artifacts; [`LikedVideosManager`] validates sample sizes, enriches and
//! stores synced records, drives a [`VideoApi`] implementation through a
//! full sync, and serves analytics with a 24-hour freshness window.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use viewtime_core::error::Result;
use viewtime_core::liked_models::{
    LikedRecord, LikedVideosAnalytics, SyncStatus, UserPreferences,
};
use viewtime_data::liked::LikedVideosProcessor;

use crate::metadata::{fetch_metadata, normalize_record, LikedPlaylistItem, VideoApi};
use crate::store::JsonStore;

/// Sample sizes analytics can be computed for. Requests outside this set
/// snap to the nearest supported value so repeated requests at the same
/// size stay comparable over time.
pub const SUPPORTED_SAMPLE_SIZES: [u32; 5] = [50, 100, 150, 200, 250];

/// Stored analytics younger than this are served without regeneration.
const FRESHNESS_HOURS: i64 = 24;

/// Page size cap when listing the liked playlist.
const LIST_PAGE_SIZE: u32 = 50;

// ── Storage ───────────────────────────────────────────────────────────────────

/// Persisted liked-videos payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredLikedVideos {
    #[serde(default)]
    pub videos: Vec<LikedRecord>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Typed repository over the liked-videos artifacts of the key-value
/// store.
pub struct LikedVideosStore {
    store: Arc<dyn JsonStore>,
}

impl LikedVideosStore {
    pub fn new(store: Arc<dyn JsonStore>) -> Self {
        Self { store }
    }

    fn videos_key(user_id: &str) -> String {
        format!("liked_videos_{}", user_id)
    }

    fn analytics_key(user_id: &str, sample_size: u32) -> String {
        format!("analytics_{}_{}", user_id, sample_size)
    }

    fn sync_status_key(user_id: &str) -> String {
        format!("sync_status_{}", user_id)
    }

    fn preferences_key(user_id: &str) -> String {
        format!("user_preferences_{}", user_id)
    }

    /// Replace the stored liked-videos set wholesale.
    pub async fn store_videos(&self, user_id: &str, videos: &[LikedRecord]) -> Result<()> {
        let payload = StoredLikedVideos {
            videos: videos.to_vec(),
            total_count: videos.len() as u64,
            last_updated: Some(Utc::now()),
        };
        self.store
            .put(&Self::videos_key(user_id), serde_json::to_value(&payload)?)
            .await
    }

    /// Stored liked videos, optionally capped at `limit`.
    pub async fn videos(&self, user_id: &str, limit: Option<usize>) -> Result<Vec<LikedRecord>> {
        let mut videos = match self.store.get(&Self::videos_key(user_id)).await? {
            Some(value) => {
                let payload: StoredLikedVideos = serde_json::from_value(value)?;
                payload.videos
            }
            None => Vec::new(),
        };
        if let Some(limit) = limit {
            videos.truncate(limit);
        }
        Ok(videos)
    }

    /// Number of stored liked videos.
    pub async fn videos_count(&self, user_id: &str) -> Result<u64> {
        match self.store.get(&Self::videos_key(user_id)).await? {
            Some(value) => {
                let payload: StoredLikedVideos = serde_json::from_value(value)?;
                Ok(payload.total_count)
            }
            None => Ok(0),
        }
    }

    /// Persist an analytics snapshot under its sample-size key.
    pub async fn store_analytics(&self, analytics: &LikedVideosAnalytics) -> Result<()> {
        self.store
            .put(
                &Self::analytics_key(&analytics.user_id, analytics.sample_size),
                serde_json::to_value(analytics)?,
            )
            .await
    }

    pub async fn analytics(
        &self,
        user_id: &str,
        sample_size: u32,
    ) -> Result<Option<LikedVideosAnalytics>> {
        match self
            .store
            .get(&Self::analytics_key(user_id, sample_size))
            .await?
        {
            Some(value) if !value.is_null() => Ok(Some(serde_json::from_value(value)?)),
            _ => Ok(None),
        }
    }

    pub async fn store_sync_status(&self, status: &SyncStatus) -> Result<()> {
        self.store
            .put(
                &Self::sync_status_key(&status.user_id),
                serde_json::to_value(status)?,
            )
            .await
    }

    pub async fn sync_status(&self, user_id: &str) -> Result<Option<SyncStatus>> {
        match self.store.get(&Self::sync_status_key(user_id)).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub async fn store_preferences(
        &self,
        user_id: &str,
        preferences: &UserPreferences,
    ) -> Result<()> {
        self.store
            .put(
                &Self::preferences_key(user_id),
                serde_json::to_value(preferences)?,
            )
            .await
    }

    pub async fn preferences(&self, user_id: &str) -> Result<UserPreferences> {
        match self.store.get(&Self::preferences_key(user_id)).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(UserPreferences::default()),
        }
    }
}

// ── Manager ───────────────────────────────────────────────────────────────────

/// Outcome of a successful liked-videos sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub videos_synced: usize,
    pub sample_size: u32,
    pub analytics_generated: bool,
    pub api_calls_made: u32,
}

/// Compact per-user summary for presentation layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub user_id: String,
    pub total_liked_videos: u64,
    pub preferred_sample_size: u32,
    pub analytics_available: bool,
    pub last_analysis_date: Option<DateTime<Utc>>,
    pub data_completeness_score: f64,
}

/// Availability of analytics at one sample size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsAvailability {
    pub available: bool,
    pub analysis_date: Option<DateTime<Utc>>,
    pub data_completeness_score: f64,
}

/// Orchestrates the liked-videos pipeline for one store.
pub struct LikedVideosManager {
    store: LikedVideosStore,
    processor: LikedVideosProcessor,
}

impl LikedVideosManager {
    pub fn new(store: Arc<dyn JsonStore>) -> Self {
        Self {
            store: LikedVideosStore::new(store),
            processor: LikedVideosProcessor::new(),
        }
    }

    // ── Sample sizes ──────────────────────────────────────────────────────────

    /// Snap a requested sample size to the nearest supported value,
    /// logging the adjustment. Never an error.
    pub fn validate_sample_size(requested: u32) -> u32 {
        if SUPPORTED_SAMPLE_SIZES.contains(&requested) {
            return requested;
        }
        let closest = SUPPORTED_SAMPLE_SIZES
            .iter()
            .copied()
            .min_by_key(|&size| size.abs_diff(requested))
            .unwrap_or(100);
        info!(requested, closest, "unsupported sample size adjusted");
        closest
    }

    // ── Records ───────────────────────────────────────────────────────────────

    /// Enrich and store a batch of liked records, replacing the stored
    /// set wholesale. Enrichment stamps sync timestamps and extracts
    /// keywords from title + description.
    pub async fn store_batch(&self, user_id: &str, mut videos: Vec<LikedRecord>) -> Result<usize> {
        let now = Utc::now();
        for video in &mut videos {
            let combined = format!("{} {}", video.title, video.description);
            video.extracted_keywords = self.processor.extract_keywords(&combined, 20);
            video.synced_at = Some(now);
            video.updated_at = Some(now);
        }

        self.store.store_videos(user_id, &videos).await?;
        info!(user_id, count = videos.len(), "stored liked-videos batch");
        Ok(videos.len())
    }

    // ── Analytics ─────────────────────────────────────────────────────────────

    /// Compute and persist a fresh snapshot from the stored records.
    ///
    /// Returns `None` when the user has no stored liked videos.
    pub async fn generate_analytics(
        &self,
        user_id: &str,
        sample_size: u32,
    ) -> Result<Option<LikedVideosAnalytics>> {
        let sample_size = Self::validate_sample_size(sample_size);
        let videos = self
            .store
            .videos(user_id, Some(sample_size as usize))
            .await?;
        if videos.is_empty() {
            info!(user_id, "no liked videos stored; skipping analytics");
            return Ok(None);
        }

        let analytics = self
            .processor
            .complete_analytics(user_id, &videos, sample_size);
        self.store.store_analytics(&analytics).await?;
        Ok(Some(analytics))
    }

    /// Serve analytics, reusing a stored snapshot younger than 24 hours
    /// and regenerating otherwise.
    pub async fn analytics(
        &self,
        user_id: &str,
        sample_size: u32,
    ) -> Result<Option<LikedVideosAnalytics>> {
        let sample_size = Self::validate_sample_size(sample_size);

        if let Some(existing) = self.store.analytics(user_id, sample_size).await? {
            let age = Utc::now() - existing.analysis_date;
            if age < TimeDelta::hours(FRESHNESS_HOURS) {
                info!(user_id, sample_size, "serving cached liked-videos analytics");
                return Ok(Some(existing));
            }
        }

        self.generate_analytics(user_id, sample_size).await
    }

    // ── Sync ──────────────────────────────────────────────────────────────────

    /// Run a full sync against a [`VideoApi`] implementation.
    ///
    /// Pages through the liked playlist up to the validated sample size,
    /// batch-fetches metadata (failed batches are skipped, not fatal),
    /// normalizes and stores the records, regenerates analytics and
    /// records the outcome in the persisted [`SyncStatus`]. Any failure
    /// marks the status with the error before surfacing it.
    pub async fn sync(
        &self,
        user_id: &str,
        api: &dyn VideoApi,
        requested_sample_size: u32,
    ) -> Result<SyncOutcome> {
        let sample_size = Self::validate_sample_size(requested_sample_size);

        self.store
            .store_preferences(
                user_id,
                &UserPreferences {
                    preferred_sample_size: sample_size,
                },
            )
            .await?;

        let mut status = self
            .store
            .sync_status(user_id)
            .await?
            .unwrap_or_else(|| SyncStatus::new(user_id));
        status.is_syncing = true;
        status.last_sync_attempt = Some(Utc::now());
        status.preferred_sample_size = sample_size;
        self.store.store_sync_status(&status).await?;

        match self.sync_inner(user_id, api, sample_size).await {
            Ok(outcome) => {
                status.is_syncing = false;
                status.last_successful_sync = Some(Utc::now());
                status.videos_fetched = outcome.videos_synced as u32;
                status.videos_processed = outcome.videos_synced as u32;
                status.videos_failed = 0;
                status.last_error = None;
                status.consecutive_failures = 0;
                status.api_calls_made = outcome.api_calls_made;
                self.store.store_sync_status(&status).await?;
                Ok(outcome)
            }
            Err(e) => {
                status.is_syncing = false;
                status.last_error = Some(e.to_string());
                status.consecutive_failures += 1;
                if let Err(se) = self.store.store_sync_status(&status).await {
                    warn!(user_id, error = %se, "failed to record sync error status");
                }
                Err(e)
            }
        }
    }

    async fn sync_inner(
        &self,
        user_id: &str,
        api: &dyn VideoApi,
        sample_size: u32,
    ) -> Result<SyncOutcome> {
        // Page through the liked playlist, sequentially, up to the sample.
        let mut items: Vec<LikedPlaylistItem> = Vec::new();
        let mut page_token: Option<String> = None;
        let mut api_calls_made = 0u32;

        while items.len() < sample_size as usize {
            let remaining = sample_size as usize - items.len();
            let page = api
                .list_liked(page_token.as_deref(), LIST_PAGE_SIZE.min(remaining as u32))
                .await?;
            api_calls_made += 1;

            if page.items.is_empty() {
                break;
            }
            items.extend(page.items);

            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }
        items.truncate(sample_size as usize);

        // Batched metadata lookup; items whose batch failed are absent.
        let ids: Vec<String> = items.iter().map(|item| item.video_id.clone()).collect();
        let fetch = fetch_metadata(api, &ids).await;
        api_calls_made += fetch.api_calls_made;

        let by_id: BTreeMap<&str, &crate::metadata::ApiVideo> = fetch
            .videos
            .iter()
            .map(|video| (video.video_id.as_str(), video))
            .collect();

        let records: Vec<LikedRecord> = items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| {
                by_id
                    .get(item.video_id.as_str())
                    .map(|video| normalize_record(item, video, idx as u32 + 1))
            })
            .collect();

        let stored = self.store_batch(user_id, records).await?;

        let analytics_generated = match self.generate_analytics(user_id, sample_size).await {
            Ok(result) => result.is_some(),
            Err(e) => {
                warn!(user_id, error = %e, "analytics generation failed after sync");
                false
            }
        };

        info!(
            user_id,
            videos = stored,
            api_calls = api_calls_made,
            "liked-videos sync completed"
        );
        Ok(SyncOutcome {
            videos_synced: stored,
            sample_size,
            analytics_generated,
            api_calls_made,
        })
    }

    // ── Summaries ─────────────────────────────────────────────────────────────

    /// Current sync status, if any sync was ever attempted.
    pub async fn sync_status(&self, user_id: &str) -> Result<Option<SyncStatus>> {
        self.store.sync_status(user_id).await
    }

    /// Comprehensive per-user summary without triggering regeneration.
    pub async fn user_summary(&self, user_id: &str) -> Result<UserSummary> {
        let preferences = self.store.preferences(user_id).await?;
        let preferred = Self::validate_sample_size(preferences.preferred_sample_size);
        let analytics = self.store.analytics(user_id, preferred).await?;
        let total = self.store.videos_count(user_id).await?;

        Ok(UserSummary {
            user_id: user_id.to_string(),
            total_liked_videos: total,
            preferred_sample_size: preferred,
            analytics_available: analytics.is_some(),
            last_analysis_date: analytics.as_ref().map(|a| a.analysis_date),
            data_completeness_score: analytics
                .as_ref()
                .map(|a| a.data_completeness_score)
                .unwrap_or(0.0),
        })
    }

    /// Availability of stored analytics at every supported sample size.
    pub async fn overview(&self, user_id: &str) -> Result<BTreeMap<u32, AnalyticsAvailability>> {
        let mut overview = BTreeMap::new();
        for &size in &SUPPORTED_SAMPLE_SIZES {
            let analytics = self.store.analytics(user_id, size).await?;
            overview.insert(
                size,
                AnalyticsAvailability {
                    available: analytics.is_some(),
                    analysis_date: analytics.as_ref().map(|a| a.analysis_date),
                    data_completeness_score: analytics
                        .as_ref()
                        .map(|a| a.data_completeness_score)
                        .unwrap_or(0.0),
                },
            );
        }
        Ok(overview)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
