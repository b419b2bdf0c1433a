//! Watch-history analytics aggregation.
//!
//! Consumes the full event set plus its derived sessions and computes the
//! persisted [`WatchHistoryAnalytics`] snapshot: totals, session-derived
//! averages, source shares, repeat views, time-pattern heatmaps and the
//! derived minute budgets.

use std::collections::BTreeMap;
use std::collections::HashMap;

use chrono::{Datelike, Timelike, Utc};
use tracing::debug;
use viewtime_core::models::{
    round2, round3, RepeatView, SourceBreakdown, ViewSource, WatchEvent, WatchHistoryAnalytics,
    WatchSession,
};

use crate::sessions::SessionBuilder;

/// Fixed per-event estimate for short-form playback.
pub const SHORT_ESTIMATED_SECONDS: u32 = 45;

/// Bound on the repeat-view top list.
const REPEAT_VIEWS_CAP: usize = 10;

/// Session-duration histogram buckets as (label, lower, upper) minutes.
/// Every label is always present in output, even at zero.
const SESSION_DURATION_BUCKETS: &[(&str, f64, Option<f64>)] = &[
    ("<5 min", 0.0, Some(5.0)),
    ("5-15 min", 5.0, Some(15.0)),
    ("15-30 min", 15.0, Some(30.0)),
    ("30-60 min", 30.0, Some(60.0)),
    (">60 min", 60.0, None),
];

/// Computes the watch-history analytics snapshot.
pub struct HistoryAggregator {
    session_builder: SessionBuilder,
}

impl Default for HistoryAggregator {
    fn default() -> Self {
        Self {
            session_builder: SessionBuilder::default(),
        }
    }
}

impl HistoryAggregator {
    /// Build an aggregator around a specific [`SessionBuilder`].
    pub fn new(session_builder: SessionBuilder) -> Self {
        Self { session_builder }
    }

    /// Compute the full snapshot for `events` in caller-supplied order
    /// (newest first as produced by the parser).
    ///
    /// Zero-event input yields an all-zero snapshot, never an error; the
    /// session-duration histogram still carries every bucket key.
    pub fn compute(&self, user_id: &str, events: &[WatchEvent]) -> WatchHistoryAnalytics {
        if events.is_empty() {
            return Self::empty_snapshot(user_id);
        }

        // Sessionisation needs ascending time order.
        let mut ascending: Vec<WatchEvent> = events.to_vec();
        ascending.sort_by(|a, b| a.watched_at.cmp(&b.watched_at));
        let sessions = self.session_builder.build(user_id, &ascending);

        let estimated_total_seconds: u64 = sessions
            .iter()
            .map(|s| u64::from(s.estimated_duration_seconds))
            .sum();
        let session_count = sessions.len() as f64;
        let total_minutes = estimated_total_seconds as f64 / 60.0;

        let average_session_duration_minutes = total_minutes / session_count;
        let average_videos_per_session =
            sessions.iter().map(|s| f64::from(s.total_events)).sum::<f64>() / session_count;

        let total_events = events.len() as f64;
        let algorithmic_count = events
            .iter()
            .filter(|e| e.source == ViewSource::Algorithmic)
            .count() as f64;
        let intentional_count = total_events - algorithmic_count;
        let shorts_count = events.iter().filter(|e| e.is_short).count() as f64;

        // Elapsed calendar span, inclusive; at least one day / one week.
        let first_date = ascending[0].watched_at.date_naive();
        let last_date = ascending[ascending.len() - 1].watched_at.date_naive();
        let date_range_days = (last_date - first_date).num_days() + 1;
        let daily_average_minutes = total_minutes / date_range_days.max(1) as f64;
        let weeks = (date_range_days as f64 / 7.0).max(1.0);
        let weekly_minutes = total_minutes / weeks;

        let longest_session_minutes = sessions
            .iter()
            .map(|s| u64::from(s.estimated_duration_seconds))
            .max()
            .unwrap_or(0) as f64
            / 60.0;
        let shorts_total_minutes = sessions
            .iter()
            .map(|s| u64::from(s.shorts_count) * u64::from(SHORT_ESTIMATED_SECONDS))
            .sum::<u64>() as f64
            / 60.0;

        let snapshot = WatchHistoryAnalytics {
            user_id: user_id.to_string(),
            generated_at: Utc::now(),
            total_events: events.len() as u64,
            unique_videos: Self::unique_count(events, |e| e.video_id.as_str()),
            unique_channels: Self::unique_count(events, |e| e.channel_title.as_str()),
            average_session_duration_minutes: round2(average_session_duration_minutes),
            average_videos_per_session: round2(average_videos_per_session),
            average_shorts_streak_minutes: round2(Self::average_shorts_streak_minutes(events)),
            algorithmic_view_share: round3(algorithmic_count / total_events),
            intentional_view_share: round3(intentional_count / total_events),
            recommendation_breakdown: Self::recommendation_breakdown(events),
            repeat_views: Self::repeat_views(events),
            heatmap: Self::build_heatmap(events),
            daily_distribution: Self::daily_distribution(events),
            shorts_share: round3(shorts_count / total_events),
            daily_average_minutes: round2(daily_average_minutes),
            weekly_minutes: round2(weekly_minutes),
            session_distribution: Self::session_distribution(&sessions),
            longest_session_minutes: round2(longest_session_minutes),
            shorts_total_minutes: round2(shorts_total_minutes),
            // Only session-level duration is reliable, so category minutes
            // are allocated proportionally by event-count share.
            algorithmic_minutes: round2(total_minutes * (algorithmic_count / total_events)),
            intentional_minutes: round2(total_minutes * (intentional_count / total_events)),
        };

        debug!(
            user_id,
            events = events.len(),
            sessions = sessions.len(),
            "computed watch-history analytics"
        );
        snapshot
    }

    // ── Components ────────────────────────────────────────────────────────────

    fn unique_count<'a>(events: &'a [WatchEvent], key: impl Fn(&'a WatchEvent) -> &'a str) -> u64 {
        let set: std::collections::HashSet<&str> = events.iter().map(key).collect();
        set.len() as u64
    }

    /// Average closed-streak length over consecutive short-form events,
    /// in minutes. Events are scanned in their caller-supplied order; each
    /// short contributes a fixed 45 s; a trailing open streak is closed
    /// and counted. No streaks yields 0.
    fn average_shorts_streak_minutes(events: &[WatchEvent]) -> f64 {
        let mut streaks: Vec<u32> = Vec::new();
        let mut current: u32 = 0;

        for event in events {
            if event.is_short {
                current += SHORT_ESTIMATED_SECONDS;
            } else if current > 0 {
                streaks.push(current);
                current = 0;
            }
        }
        if current > 0 {
            streaks.push(current);
        }

        if streaks.is_empty() {
            return 0.0;
        }
        let total: u64 = streaks.iter().map(|&s| u64::from(s)).sum();
        total as f64 / streaks.len() as f64 / 60.0
    }

    /// Count events per source detail label, with the generic source name
    /// standing in when detail is absent. Ordered descending by count,
    /// first-seen order breaking ties.
    fn recommendation_breakdown(events: &[WatchEvent]) -> Vec<SourceBreakdown> {
        let mut counts: HashMap<String, u32> = HashMap::new();
        let mut order: Vec<String> = Vec::new();

        for event in events {
            let label = event
                .source_detail
                .clone()
                .unwrap_or_else(|| event.source.label().to_string());
            match counts.get_mut(&label) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(label.clone(), 1);
                    order.push(label);
                }
            }
        }

        let mut breakdown: Vec<SourceBreakdown> = order
            .into_iter()
            .map(|label| {
                let count = counts[&label];
                SourceBreakdown { label, count }
            })
            .collect();
        breakdown.sort_by(|a, b| b.count.cmp(&a.count));
        breakdown
    }

    /// Videos watched more than once, top 10 by (count desc, recency desc).
    fn repeat_views(events: &[WatchEvent]) -> Vec<RepeatView> {
        struct Group<'a> {
            first: &'a WatchEvent,
            count: u32,
            last_watched_at: chrono::DateTime<Utc>,
        }

        let mut groups: HashMap<&str, Group<'_>> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();

        for event in events {
            match groups.get_mut(event.video_id.as_str()) {
                Some(group) => {
                    group.count += 1;
                    if event.watched_at > group.last_watched_at {
                        group.last_watched_at = event.watched_at;
                    }
                }
                None => {
                    groups.insert(
                        &event.video_id,
                        Group {
                            first: event,
                            count: 1,
                            last_watched_at: event.watched_at,
                        },
                    );
                    order.push(&event.video_id);
                }
            }
        }

        let mut repeated: Vec<RepeatView> = order
            .into_iter()
            .filter_map(|video_id| {
                let group = &groups[video_id];
                (group.count >= 2).then(|| RepeatView {
                    video_id: video_id.to_string(),
                    title: group.first.title.clone(),
                    channel_title: group.first.channel_title.clone(),
                    watch_count: group.count,
                    last_watched_at: group.last_watched_at,
                })
            })
            .collect();

        repeated.sort_by(|a, b| {
            b.watch_count
                .cmp(&a.watch_count)
                .then(b.last_watched_at.cmp(&a.last_watched_at))
        });
        repeated.truncate(REPEAT_VIEWS_CAP);
        repeated
    }

    /// Sparse weekday (Monday = 0) x hour-of-day event counts.
    fn build_heatmap(events: &[WatchEvent]) -> BTreeMap<u8, BTreeMap<u8, u32>> {
        let mut heatmap: BTreeMap<u8, BTreeMap<u8, u32>> = BTreeMap::new();
        for event in events {
            let weekday = event.watched_at.weekday().num_days_from_monday() as u8;
            let hour = event.watched_at.hour() as u8;
            *heatmap.entry(weekday).or_default().entry(hour).or_insert(0) += 1;
        }
        heatmap
    }

    /// Event counts per ISO calendar date.
    fn daily_distribution(events: &[WatchEvent]) -> BTreeMap<String, u32> {
        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        for event in events {
            let key = event.watched_at.format("%Y-%m-%d").to_string();
            *counts.entry(key).or_insert(0) += 1;
        }
        counts
    }

    /// Place every session into exactly one duration bucket; all bucket
    /// keys are present even at zero.
    fn session_distribution(sessions: &[WatchSession]) -> BTreeMap<String, u32> {
        let mut distribution: BTreeMap<String, u32> = SESSION_DURATION_BUCKETS
            .iter()
            .map(|(label, _, _)| (label.to_string(), 0))
            .collect();

        for session in sessions {
            let minutes = session.estimated_duration_minutes();
            for (label, lower, upper) in SESSION_DURATION_BUCKETS {
                if minutes < *lower {
                    continue;
                }
                if upper.is_none() || minutes < upper.unwrap_or(f64::INFINITY) {
                    *distribution.entry(label.to_string()).or_insert(0) += 1;
                    break;
                }
            }
        }
        distribution
    }

    fn empty_snapshot(user_id: &str) -> WatchHistoryAnalytics {
        WatchHistoryAnalytics {
            user_id: user_id.to_string(),
            generated_at: Utc::now(),
            total_events: 0,
            unique_videos: 0,
            unique_channels: 0,
            average_session_duration_minutes: 0.0,
            average_videos_per_session: 0.0,
            average_shorts_streak_minutes: 0.0,
            algorithmic_view_share: 0.0,
            intentional_view_share: 0.0,
            recommendation_breakdown: Vec::new(),
            repeat_views: Vec::new(),
            heatmap: BTreeMap::new(),
            daily_distribution: BTreeMap::new(),
            shorts_share: 0.0,
            daily_average_minutes: 0.0,
            weekly_minutes: 0.0,
            session_distribution: SESSION_DURATION_BUCKETS
                .iter()
                .map(|(label, _, _)| (label.to_string(), 0))
                .collect(),
            longest_session_minutes: 0.0,
            shorts_total_minutes: 0.0,
            algorithmic_minutes: 0.0,
            intentional_minutes: 0.0,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn make_event(ts: &str, video_id: &str) -> WatchEvent {
        WatchEvent {
            user_id: "u1".to_string(),
            video_id: video_id.to_string(),
            title: format!("Title {}", video_id),
            channel_title: format!("Channel {}", video_id),
            watched_at: DateTime::parse_from_rfc3339(ts)
                .unwrap()
                .with_timezone(&Utc),
            source: ViewSource::Algorithmic,
            source_detail: None,
            url: None,
            duration_seconds: None,
            is_short: false,
        }
    }

    fn make_short(ts: &str, video_id: &str) -> WatchEvent {
        WatchEvent {
            is_short: true,
            ..make_event(ts, video_id)
        }
    }

    fn aggregator() -> HistoryAggregator {
        HistoryAggregator::default()
    }

    // ── Empty input ───────────────────────────────────────────────────────────

    #[test]
    fn test_empty_input_yields_zero_snapshot() {
        let snapshot = aggregator().compute("u1", &[]);

        assert_eq!(snapshot.total_events, 0);
        assert_eq!(snapshot.unique_videos, 0);
        assert_eq!(snapshot.algorithmic_view_share, 0.0);
        assert!(snapshot.repeat_views.is_empty());
        assert!(snapshot.heatmap.is_empty());
    }

    #[test]
    fn test_empty_input_still_has_all_session_buckets() {
        let snapshot = aggregator().compute("u1", &[]);
        for (label, _, _) in SESSION_DURATION_BUCKETS {
            assert_eq!(snapshot.session_distribution.get(*label), Some(&0));
        }
    }

    // ── Totals and averages ───────────────────────────────────────────────────

    #[test]
    fn test_single_event_totals() {
        let events = vec![make_event("2024-01-01T10:00:00Z", "a")];
        let snapshot = aggregator().compute("u1", &events);

        assert_eq!(snapshot.total_events, 1);
        assert_eq!(snapshot.unique_videos, 1);
        assert_eq!(snapshot.unique_channels, 1);
        // One session seeded at 300 s = 5 minutes.
        assert!((snapshot.average_session_duration_minutes - 5.0).abs() < 1e-9);
        assert!((snapshot.average_videos_per_session - 1.0).abs() < 1e-9);
        assert!((snapshot.longest_session_minutes - 5.0).abs() < 1e-9);
        // Single calendar day, single week.
        assert!((snapshot.daily_average_minutes - 5.0).abs() < 1e-9);
        assert!((snapshot.weekly_minutes - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_unique_counts_deduplicate() {
        let events = vec![
            make_event("2024-01-01T10:00:00Z", "a"),
            make_event("2024-01-01T10:05:00Z", "a"),
            make_event("2024-01-01T10:10:00Z", "b"),
        ];
        let snapshot = aggregator().compute("u1", &events);
        assert_eq!(snapshot.total_events, 3);
        assert_eq!(snapshot.unique_videos, 2);
        assert_eq!(snapshot.unique_channels, 2);
    }

    // ── Source shares ─────────────────────────────────────────────────────────

    #[test]
    fn test_source_shares_sum_to_one() {
        let mut events = vec![
            make_event("2024-01-01T10:00:00Z", "a"),
            make_event("2024-01-01T10:05:00Z", "b"),
        ];
        events[1].source = ViewSource::Intentional;
        let snapshot = aggregator().compute("u1", &events);

        assert!((snapshot.algorithmic_view_share - 0.5).abs() < 1e-9);
        assert!((snapshot.intentional_view_share - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_recommendation_breakdown_sorted_by_count() {
        let mut events = vec![
            make_event("2024-01-01T10:00:00Z", "a"),
            make_event("2024-01-01T10:05:00Z", "b"),
            make_event("2024-01-01T10:10:00Z", "c"),
        ];
        events[0].source_detail = Some("Autoplay".to_string());
        events[1].source_detail = Some("Autoplay".to_string());
        events[2].source = ViewSource::Intentional;
        events[2].source_detail = Some("Searched for rust".to_string());

        let snapshot = aggregator().compute("u1", &events);
        assert_eq!(snapshot.recommendation_breakdown[0].label, "Autoplay");
        assert_eq!(snapshot.recommendation_breakdown[0].count, 2);
        assert_eq!(
            snapshot.recommendation_breakdown[1].label,
            "Searched for rust"
        );
    }

    #[test]
    fn test_recommendation_breakdown_generic_fallback() {
        let events = vec![make_event("2024-01-01T10:00:00Z", "a")];
        let snapshot = aggregator().compute("u1", &events);
        assert_eq!(snapshot.recommendation_breakdown[0].label, "Algorithmic");
    }

    // ── Repeat views ──────────────────────────────────────────────────────────

    #[test]
    fn test_repeat_views_single_video_many_watches() {
        // Five watches of the same video scattered over a month.
        let events = vec![
            make_event("2024-01-01T10:00:00Z", "a"),
            make_event("2024-01-08T11:00:00Z", "a"),
            make_event("2024-01-15T12:00:00Z", "a"),
            make_event("2024-01-22T13:00:00Z", "a"),
            make_event("2024-01-29T14:00:00Z", "a"),
        ];
        let snapshot = aggregator().compute("u1", &events);

        assert_eq!(snapshot.repeat_views.len(), 1);
        assert_eq!(snapshot.repeat_views[0].watch_count, 5);
        assert_eq!(
            snapshot.repeat_views[0].last_watched_at,
            DateTime::parse_from_rfc3339("2024-01-29T14:00:00Z").unwrap()
        );
    }

    #[test]
    fn test_repeat_views_excludes_single_watches() {
        let events = vec![
            make_event("2024-01-01T10:00:00Z", "a"),
            make_event("2024-01-01T11:00:00Z", "b"),
        ];
        let snapshot = aggregator().compute("u1", &events);
        assert!(snapshot.repeat_views.is_empty());
    }

    #[test]
    fn test_repeat_views_ordered_by_count_then_recency() {
        let events = vec![
            // "a": 3 watches, "b": 2 watches ending later than "c": 2 watches.
            make_event("2024-01-01T10:00:00Z", "a"),
            make_event("2024-01-02T10:00:00Z", "a"),
            make_event("2024-01-03T10:00:00Z", "a"),
            make_event("2024-01-01T11:00:00Z", "c"),
            make_event("2024-01-02T11:00:00Z", "c"),
            make_event("2024-01-01T12:00:00Z", "b"),
            make_event("2024-01-04T12:00:00Z", "b"),
        ];
        let snapshot = aggregator().compute("u1", &events);

        let ids: Vec<&str> = snapshot
            .repeat_views
            .iter()
            .map(|r| r.video_id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_repeat_views_truncated_to_ten() {
        let mut events = Vec::new();
        for i in 0..15 {
            let id = format!("v{}", i);
            events.push(make_event(&format!("2024-01-{:02}T10:00:00Z", i + 1), &id));
            events.push(make_event(&format!("2024-01-{:02}T11:00:00Z", i + 1), &id));
        }
        let snapshot = aggregator().compute("u1", &events);
        assert_eq!(snapshot.repeat_views.len(), 10);
    }

    // ── Time patterns ─────────────────────────────────────────────────────────

    #[test]
    fn test_heatmap_weekday_monday_is_zero() {
        // 2024-01-01 was a Monday.
        let events = vec![make_event("2024-01-01T10:00:00Z", "a")];
        let snapshot = aggregator().compute("u1", &events);
        assert_eq!(snapshot.heatmap[&0][&10], 1);
    }

    #[test]
    fn test_heatmap_is_sparse() {
        let events = vec![make_event("2024-01-01T10:00:00Z", "a")];
        let snapshot = aggregator().compute("u1", &events);
        assert_eq!(snapshot.heatmap.len(), 1);
        assert_eq!(snapshot.heatmap[&0].len(), 1);
    }

    #[test]
    fn test_daily_distribution_counts_per_date() {
        let events = vec![
            make_event("2024-01-01T10:00:00Z", "a"),
            make_event("2024-01-01T22:00:00Z", "b"),
            make_event("2024-01-02T10:00:00Z", "c"),
        ];
        let snapshot = aggregator().compute("u1", &events);
        assert_eq!(snapshot.daily_distribution["2024-01-01"], 2);
        assert_eq!(snapshot.daily_distribution["2024-01-02"], 1);
    }

    // ── Shorts ────────────────────────────────────────────────────────────────

    #[test]
    fn test_shorts_share() {
        let events = vec![
            make_short("2024-01-01T10:00:00Z", "a"),
            make_event("2024-01-01T10:05:00Z", "b"),
        ];
        let snapshot = aggregator().compute("u1", &events);
        assert!((snapshot.shorts_share - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_shorts_streak_average() {
        // Two closed streaks: [short, short] then [short] after a regular.
        let events = vec![
            make_short("2024-01-01T10:00:00Z", "a"),
            make_short("2024-01-01T10:01:00Z", "b"),
            make_event("2024-01-01T10:02:00Z", "c"),
            make_short("2024-01-01T10:03:00Z", "d"),
        ];
        let snapshot = aggregator().compute("u1", &events);
        // Streaks: 90 s and 45 s; average 67.5 s = 1.125 min, rounded 1.13.
        assert!((snapshot.average_shorts_streak_minutes - 1.13).abs() < 1e-9);
    }

    #[test]
    fn test_shorts_streak_zero_without_shorts() {
        let events = vec![make_event("2024-01-01T10:00:00Z", "a")];
        let snapshot = aggregator().compute("u1", &events);
        assert_eq!(snapshot.average_shorts_streak_minutes, 0.0);
    }

    #[test]
    fn test_shorts_total_minutes_from_sessions() {
        let events = vec![
            make_short("2024-01-01T10:00:00Z", "a"),
            make_short("2024-01-01T10:01:00Z", "b"),
        ];
        let snapshot = aggregator().compute("u1", &events);
        // 2 shorts x 45 s = 90 s = 1.5 min.
        assert!((snapshot.shorts_total_minutes - 1.5).abs() < 1e-9);
    }

    // ── Session distribution ──────────────────────────────────────────────────

    #[test]
    fn test_session_distribution_places_sessions() {
        // One 2-event session: 300 + 600 = 900 s = 15 min -> "15-30 min".
        let events = vec![
            make_event("2024-01-01T10:00:00Z", "a"),
            make_event("2024-01-01T10:10:00Z", "b"),
        ];
        let snapshot = aggregator().compute("u1", &events);

        assert_eq!(snapshot.session_distribution["15-30 min"], 1);
        let total: u32 = snapshot.session_distribution.values().sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_session_distribution_all_keys_present() {
        let events = vec![make_event("2024-01-01T10:00:00Z", "a")];
        let snapshot = aggregator().compute("u1", &events);
        assert_eq!(snapshot.session_distribution.len(), 5);
    }

    // ── Minute budgets ────────────────────────────────────────────────────────

    #[test]
    fn test_minute_budgets_proportional_allocation() {
        let mut events = vec![
            make_event("2024-01-01T10:00:00Z", "a"),
            make_event("2024-01-01T10:10:00Z", "b"),
        ];
        events[1].source = ViewSource::Intentional;
        let snapshot = aggregator().compute("u1", &events);

        // One session of 900 s = 15 min, split 50/50 by event share.
        assert!((snapshot.algorithmic_minutes - 7.5).abs() < 1e-9);
        assert!((snapshot.intentional_minutes - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_daily_average_over_multi_day_span() {
        // Two single-event sessions two days apart: 600 s over 3 days.
        let events = vec![
            make_event("2024-01-01T10:00:00Z", "a"),
            make_event("2024-01-03T10:00:00Z", "b"),
        ];
        let snapshot = aggregator().compute("u1", &events);
        // 10 minutes / 3 days = 3.33.
        assert!((snapshot.daily_average_minutes - 3.33).abs() < 1e-9);
    }

    // ── Input order independence ──────────────────────────────────────────────

    #[test]
    fn test_descending_input_produces_same_sessions_as_ascending() {
        let ascending = vec![
            make_event("2024-01-01T10:00:00Z", "a"),
            make_event("2024-01-01T10:10:00Z", "b"),
            make_event("2024-01-01T12:00:00Z", "c"),
        ];
        let mut descending = ascending.clone();
        descending.reverse();

        let from_asc = aggregator().compute("u1", &ascending);
        let from_desc = aggregator().compute("u1", &descending);

        assert_eq!(
            from_asc.average_session_duration_minutes,
            from_desc.average_session_duration_minutes
        );
        assert_eq!(from_asc.session_distribution, from_desc.session_distribution);
    }
}
