//! Watch-history storage and ingest orchestration.
//!
//! [`WatchHistoryStore`] hides the key-formatting convention behind typed
//! per-artifact accessors; [`WatchHistoryManager`] drives the full upload
//! flow: status -> parse -> store events -> compute analytics -> status.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use viewtime_core::error::{Result, ViewtimeError};
use viewtime_core::models::{
    ProcessingState, WatchEvent, WatchHistoryAnalytics, WatchHistoryStatus,
};
use viewtime_data::analytics::HistoryAggregator;
use viewtime_data::parser::TakeoutParser;

use crate::store::JsonStore;

// ── Storage ───────────────────────────────────────────────────────────────────

/// Persisted event payload: the event list plus bookkeeping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredEvents {
    #[serde(default)]
    pub events: Vec<WatchEvent>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Typed repository over the watch-history artifacts of the key-value
/// store.
pub struct WatchHistoryStore {
    store: Arc<dyn JsonStore>,
}

impl WatchHistoryStore {
    pub fn new(store: Arc<dyn JsonStore>) -> Self {
        Self { store }
    }

    fn events_key(user_id: &str) -> String {
        format!("watch_history_events_{}", user_id)
    }

    fn analytics_key(user_id: &str) -> String {
        format!("watch_history_analytics_{}", user_id)
    }

    fn status_key(user_id: &str) -> String {
        format!("watch_history_status_{}", user_id)
    }

    /// Replace the stored event set wholesale.
    pub async fn store_events(&self, user_id: &str, events: &[WatchEvent]) -> Result<()> {
        let payload = StoredEvents {
            events: events.to_vec(),
            total_count: events.len() as u64,
            last_updated: Some(Utc::now()),
        };
        self.store
            .put(&Self::events_key(user_id), serde_json::to_value(&payload)?)
            .await
    }

    /// The stored event set, empty when nothing was uploaded yet.
    pub async fn events(&self, user_id: &str) -> Result<Vec<WatchEvent>> {
        match self.store.get(&Self::events_key(user_id)).await? {
            Some(value) => {
                let payload: StoredEvents = serde_json::from_value(value)?;
                Ok(payload.events)
            }
            None => Ok(Vec::new()),
        }
    }

    pub async fn store_analytics(&self, analytics: &WatchHistoryAnalytics) -> Result<()> {
        self.store
            .put(
                &Self::analytics_key(&analytics.user_id),
                serde_json::to_value(analytics)?,
            )
            .await
    }

    pub async fn analytics(&self, user_id: &str) -> Result<Option<WatchHistoryAnalytics>> {
        // Deletion overwrites with null rather than removing the key.
        match self.store.get(&Self::analytics_key(user_id)).await? {
            Some(value) if !value.is_null() => Ok(Some(serde_json::from_value(value)?)),
            _ => Ok(None),
        }
    }

    /// Persist `status`, stamping `updated_at`.
    pub async fn store_status(&self, user_id: &str, mut status: WatchHistoryStatus) -> Result<()> {
        status.updated_at = Some(Utc::now());
        self.store
            .put(&Self::status_key(user_id), serde_json::to_value(&status)?)
            .await
    }

    /// The stored status record, idle by default.
    pub async fn status(&self, user_id: &str) -> Result<WatchHistoryStatus> {
        match self.store.get(&Self::status_key(user_id)).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(WatchHistoryStatus::default()),
        }
    }

    /// Reset the user's history to empty payloads and an idle status.
    pub async fn delete_history(&self, user_id: &str) -> Result<()> {
        self.store
            .put(
                &Self::events_key(user_id),
                serde_json::to_value(StoredEvents::default())?,
            )
            .await?;
        self.store
            .put(&Self::analytics_key(user_id), serde_json::Value::Null)
            .await?;
        self.store_status(user_id, WatchHistoryStatus::default())
            .await
    }
}

// ── Manager ───────────────────────────────────────────────────────────────────

/// Outcome of a successful Takeout upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub events_processed: usize,
    pub analytics_generated: bool,
}

/// Orchestrates watch-history ingest for one store.
pub struct WatchHistoryManager {
    store: WatchHistoryStore,
    parser: TakeoutParser,
    aggregator: HistoryAggregator,
}

impl WatchHistoryManager {
    pub fn new(store: Arc<dyn JsonStore>) -> Self {
        Self {
            store: WatchHistoryStore::new(store),
            parser: TakeoutParser::new(),
            aggregator: HistoryAggregator::default(),
        }
    }

    /// Ingest a Takeout upload end to end.
    ///
    /// The status record tracks the flow: `processing` while the upload
    /// is handled, `completed` with the event count on success, `error`
    /// with the failure message otherwise, so the status endpoint and
    /// the upload response always agree. Events and analytics replace
    /// any prior state wholesale; no partial state is written on
    /// failure.
    pub async fn ingest_takeout(
        &self,
        user_id: &str,
        file_bytes: &[u8],
        filename: &str,
    ) -> Result<UploadOutcome> {
        info!(user_id, filename, "processing watch-history upload");

        self.store
            .store_status(
                user_id,
                WatchHistoryStatus {
                    processing_state: ProcessingState::Processing,
                    last_uploaded_at: Some(Utc::now()),
                    ..WatchHistoryStatus::default()
                },
            )
            .await?;

        let events = match self.parser.parse(user_id, file_bytes, filename) {
            Ok(events) => events,
            Err(e) => {
                self.record_error(user_id, &e.to_string()).await;
                return Err(e);
            }
        };

        if events.is_empty() {
            let err = ViewtimeError::EmptyResult;
            self.record_error(user_id, &err.to_string()).await;
            return Err(err);
        }

        self.store.store_events(user_id, &events).await?;

        let analytics = self.aggregator.compute(user_id, &events);
        self.store.store_analytics(&analytics).await?;

        self.store
            .store_status(
                user_id,
                WatchHistoryStatus {
                    processing_state: ProcessingState::Completed,
                    last_uploaded_at: Some(Utc::now()),
                    total_events: events.len() as u64,
                    ..WatchHistoryStatus::default()
                },
            )
            .await?;

        info!(
            user_id,
            events = events.len(),
            "watch-history upload completed"
        );
        Ok(UploadOutcome {
            events_processed: events.len(),
            analytics_generated: true,
        })
    }

    /// Current ingest status, idle by default.
    pub async fn status(&self, user_id: &str) -> Result<WatchHistoryStatus> {
        self.store.status(user_id).await
    }

    /// The stored analytics snapshot, if an upload ever succeeded.
    pub async fn analytics(&self, user_id: &str) -> Result<Option<WatchHistoryAnalytics>> {
        self.store.analytics(user_id).await
    }

    /// The stored events, newest first.
    pub async fn events(&self, user_id: &str) -> Result<Vec<WatchEvent>> {
        self.store.events(user_id).await
    }

    /// Delete all stored watch-history data for the user.
    pub async fn delete_history(&self, user_id: &str) -> Result<()> {
        self.store.delete_history(user_id).await
    }

    /// Best-effort error-status write; a storage failure here must not
    /// mask the original error.
    async fn record_error(&self, user_id: &str, message: &str) {
        let status = WatchHistoryStatus {
            processing_state: ProcessingState::Error,
            total_events: 0,
            error_message: Some(message.to_string()),
            ..WatchHistoryStatus::default()
        };
        if let Err(e) = self.store.store_status(user_id, status).await {
            warn!(user_id, error = %e, "failed to record error status");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
