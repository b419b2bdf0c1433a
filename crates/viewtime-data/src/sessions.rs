//! Viewing-session reconstruction.
//!
//! Groups a time-ascending event sequence into sessions using an
//! inactivity-gap rule, estimating each session's duration with a
//! bounded per-event gap contribution.

use chrono::TimeDelta;
use tracing::debug;
use viewtime_core::models::{WatchEvent, WatchSession};

/// Gap above which a new session starts.
pub const SESSION_INACTIVITY_MINUTES: i64 = 30;

/// Assumed watch duration for an event with no usable gap, and the floor
/// of every gap contribution.
pub const DEFAULT_EVENT_DURATION_SECONDS: u32 = 300;

/// Ceiling on a single gap's contribution, so one idle stretch inside a
/// session cannot inflate the estimate by hours.
pub const MAX_GAP_CONTRIBUTION_SECONDS: u32 = 900;

/// Groups watch events into sessions.
pub struct SessionBuilder {
    inactivity_threshold: TimeDelta,
    floor_seconds: u32,
    ceiling_seconds: u32,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new(
            TimeDelta::minutes(SESSION_INACTIVITY_MINUTES),
            DEFAULT_EVENT_DURATION_SECONDS,
            MAX_GAP_CONTRIBUTION_SECONDS,
        )
    }
}

impl SessionBuilder {
    /// Create a builder with explicit thresholds.
    pub fn new(inactivity_threshold: TimeDelta, floor_seconds: u32, ceiling_seconds: u32) -> Self {
        Self {
            inactivity_threshold,
            floor_seconds,
            ceiling_seconds,
        }
    }

    /// Build ordered, non-overlapping sessions from events sorted
    /// ascending by `watched_at`.
    ///
    /// The first event of each session seeds the duration estimate at the
    /// floor value; each subsequent event adds
    /// `clamp(gap_seconds, floor, ceiling)`. Sessions partition the input
    /// exactly: the final open session is always flushed.
    pub fn build(&self, user_id: &str, events: &[WatchEvent]) -> Vec<WatchSession> {
        let mut iter = events.iter();
        let Some(first) = iter.next() else {
            return Vec::new();
        };

        let mut sessions: Vec<WatchSession> = Vec::new();
        let mut current = self.open_session(user_id, first);
        let mut previous_at = first.watched_at;

        for event in iter {
            let gap = event.watched_at - previous_at;
            if gap > self.inactivity_threshold {
                sessions.push(current);
                current = self.open_session(user_id, event);
            } else {
                current.end_time = event.watched_at;
                current.video_ids.push(event.video_id.clone());
                current.total_events += 1;
                if event.is_short {
                    current.shorts_count += 1;
                }
                let contribution = gap
                    .num_seconds()
                    .clamp(i64::from(self.floor_seconds), i64::from(self.ceiling_seconds))
                    as u32;
                current.estimated_duration_seconds += contribution;
            }
            previous_at = event.watched_at;
        }
        sessions.push(current);

        debug!(
            "built {} sessions from {} events",
            sessions.len(),
            events.len()
        );
        sessions
    }

    fn open_session(&self, user_id: &str, event: &WatchEvent) -> WatchSession {
        WatchSession {
            user_id: user_id.to_string(),
            start_time: event.watched_at,
            end_time: event.watched_at,
            video_ids: vec![event.video_id.clone()],
            shorts_count: u32::from(event.is_short),
            total_events: 1,
            estimated_duration_seconds: self.floor_seconds,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
