//! Liked-videos analytics processing.
//!
//! A flat-sample sibling of the watch-history aggregator: six independent
//! statistics blocks (keywords, categories, channels, lengths, trends,
//! shorts) computed over the first `sample_size` records and combined
//! into one [`LikedVideosAnalytics`] snapshot.

use std::collections::BTreeMap;

use chrono::{DateTime, Timelike, Utc};
use tracing::debug;
use viewtime_core::keywords::KeywordExtractor;
use viewtime_core::liked_models::{
    CategoryStats, ChannelInfo, ChannelStats, DayPeriod, KeywordAnalysis, KeywordCount,
    LikedContentTrends, LikedRecord, LikedVideosAnalytics, ShortsAnalysis, VideoCategory,
    VideoLengthStats, VideoType,
};
use viewtime_core::models::round2;
use viewtime_core::timestamps::parse_timestamp;

/// Videos at or under this length count as Shorts.
pub const SHORTS_MAX_SECONDS: u32 = 60;

/// Video-length histogram buckets as (label, lower, upper) seconds.
/// Every label is always present in output, even at zero.
const LENGTH_BUCKETS: &[(&str, u32, Option<u32>)] = &[
    ("0-60", 0, Some(60)),
    ("60-300", 60, Some(300)),
    ("300-600", 300, Some(600)),
    ("600-1800", 600, Some(1800)),
    ("1800+", 1800, None),
];

const TITLE_KEYWORDS_PER_VIDEO: usize = 10;
const DESCRIPTION_KEYWORDS_PER_VIDEO: usize = 5;
const TOP_KEYWORDS_CAP: usize = 50;
const CATEGORY_KEYWORDS_CAP: usize = 10;
const TOP_CHANNELS_CAP: usize = 20;

/// Computes liked-videos analytics snapshots.
pub struct LikedVideosProcessor {
    keywords: KeywordExtractor,
}

impl Default for LikedVideosProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl LikedVideosProcessor {
    pub fn new() -> Self {
        Self {
            keywords: KeywordExtractor::new(),
        }
    }

    // ── Shared helpers ────────────────────────────────────────────────────────

    /// Extract keywords from combined title + description text, used for
    /// per-record enrichment at sync time.
    pub fn extract_keywords(&self, text: &str, max_keywords: usize) -> Vec<String> {
        self.keywords.extract(text, max_keywords)
    }

    /// Bucket label for a video duration.
    pub fn categorize_video_length(duration_seconds: u32) -> &'static str {
        for &(label, lower, upper) in LENGTH_BUCKETS {
            if duration_seconds >= lower && upper.map_or(true, |hi| duration_seconds < hi) {
                return label;
            }
        }
        "1800+"
    }

    /// Whether a record counts as a Short: explicit short type, or at
    /// most 60 seconds long.
    pub fn is_short(record: &LikedRecord) -> bool {
        record.video_type == VideoType::Short || record.duration_seconds <= SHORTS_MAX_SECONDS
    }

    // ── Statistics blocks ─────────────────────────────────────────────────────

    /// Keyword frequency over the sampled window.
    pub fn keyword_analysis(
        &self,
        user_id: &str,
        records: &[LikedRecord],
        sample_size: u32,
    ) -> KeywordAnalysis {
        let subset = sample(records, sample_size);

        let mut all_keywords: Vec<String> = Vec::new();
        let mut by_category: BTreeMap<VideoCategory, Vec<String>> = BTreeMap::new();

        for record in subset {
            let mut video_keywords = self
                .keywords
                .extract(&record.title, TITLE_KEYWORDS_PER_VIDEO);
            video_keywords.extend(
                self.keywords
                    .extract(&record.description, DESCRIPTION_KEYWORDS_PER_VIDEO),
            );

            all_keywords.extend(video_keywords.iter().cloned());
            by_category
                .entry(record.category())
                .or_default()
                .extend(video_keywords);
        }

        let top_keywords: Vec<KeywordCount> = self
            .keywords
            .count(&all_keywords)
            .into_iter()
            .take(TOP_KEYWORDS_CAP)
            .map(|(keyword, count)| KeywordCount { keyword, count })
            .collect();

        let keyword_categories: BTreeMap<VideoCategory, Vec<String>> = by_category
            .into_iter()
            .map(|(category, words)| {
                let ranked: Vec<String> = self
                    .keywords
                    .count(&words)
                    .into_iter()
                    .take(CATEGORY_KEYWORDS_CAP)
                    .map(|(word, _)| word)
                    .collect();
                (category, ranked)
            })
            .collect();

        let average_keywords_per_video = if subset.is_empty() {
            0.0
        } else {
            all_keywords.len() as f64 / subset.len() as f64
        };

        KeywordAnalysis {
            user_id: user_id.to_string(),
            sample_size,
            total_unique_keywords: top_keywords.len() as u32,
            top_keywords,
            keyword_categories,
            analysis_date: Utc::now(),
            average_keywords_per_video,
        }
    }

    /// Category distribution over the sampled window.
    pub fn category_stats(
        &self,
        user_id: &str,
        records: &[LikedRecord],
        sample_size: u32,
    ) -> CategoryStats {
        let subset = sample(records, sample_size);

        let mut counts: BTreeMap<VideoCategory, u32> = BTreeMap::new();
        let mut durations: BTreeMap<VideoCategory, u64> = BTreeMap::new();
        for record in subset {
            let category = record.category();
            *counts.entry(category).or_insert(0) += 1;
            *durations.entry(category).or_insert(0) += u64::from(record.duration_seconds);
        }

        let total = subset.len() as f64;
        let percentages: BTreeMap<VideoCategory, f64> = counts
            .iter()
            .map(|(&category, &count)| {
                let pct = if total > 0.0 {
                    f64::from(count) / total * 100.0
                } else {
                    0.0
                };
                (category, pct)
            })
            .collect();

        let mut top: Vec<(VideoCategory, u32)> =
            counts.iter().map(|(&c, &n)| (c, n)).collect();
        top.sort_by(|a, b| b.1.cmp(&a.1));
        let top_categories: Vec<VideoCategory> = top.into_iter().map(|(c, _)| c).collect();

        CategoryStats {
            user_id: user_id.to_string(),
            sample_size,
            category_counts: counts,
            category_percentages: percentages,
            category_total_duration: durations,
            top_categories,
            analysis_date: Utc::now(),
        }
    }

    /// Channel distribution over the sampled window. Records without a
    /// channel id are excluded from channel counting.
    pub fn channel_stats(
        &self,
        user_id: &str,
        records: &[LikedRecord],
        sample_size: u32,
    ) -> ChannelStats {
        let subset = sample(records, sample_size);

        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        let mut info_map: BTreeMap<String, ChannelInfo> = BTreeMap::new();
        for record in subset {
            if record.channel_id.is_empty() {
                continue;
            }
            *counts.entry(record.channel_id.clone()).or_insert(0) += 1;
            info_map
                .entry(record.channel_id.clone())
                .or_insert_with(|| ChannelInfo {
                    channel_id: record.channel_id.clone(),
                    channel_title: record.channel_title.clone(),
                    channel_url: record.channel_url.clone(),
                    subscriber_count: record.subscriber_count,
                });
        }

        // Concentration measure over per-channel like shares; the share
        // denominator is the sampled window size, matching how stored
        // historical scores were computed.
        let total_videos = subset.len() as f64;
        let mut diversity_score = 0.0;
        if total_videos > 0.0 {
            for &count in counts.values() {
                let probability = f64::from(count) / total_videos;
                if probability > 0.0 {
                    diversity_score -= probability * probability.sqrt();
                }
            }
        }

        let mut ranked: Vec<(String, u32)> =
            counts.iter().map(|(id, &n)| (id.clone(), n)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        let top_channels: Vec<String> = ranked
            .into_iter()
            .take(TOP_CHANNELS_CAP)
            .map(|(id, _)| id)
            .collect();

        let average_likes_per_channel = if counts.is_empty() {
            0.0
        } else {
            counts.values().map(|&n| f64::from(n)).sum::<f64>() / counts.len() as f64
        };

        ChannelStats {
            user_id: user_id.to_string(),
            sample_size,
            total_unique_channels: counts.len() as u32,
            channel_like_counts: counts,
            channel_info_map: info_map,
            top_channels,
            average_likes_per_channel,
            channel_diversity_score: diversity_score,
            analysis_date: Utc::now(),
        }
    }

    /// Video-length distribution over the sampled window.
    pub fn length_stats(
        &self,
        user_id: &str,
        records: &[LikedRecord],
        sample_size: u32,
    ) -> VideoLengthStats {
        let subset = sample(records, sample_size);
        let durations: Vec<u32> = subset.iter().map(|r| r.duration_seconds).collect();

        let mut buckets: BTreeMap<String, u32> = LENGTH_BUCKETS
            .iter()
            .map(|(label, _, _)| (label.to_string(), 0))
            .collect();
        let mut shorts_count = 0u32;
        let mut regular_count = 0u32;
        for &duration in &durations {
            let label = Self::categorize_video_length(duration);
            *buckets.entry(label.to_string()).or_insert(0) += 1;
            if duration <= SHORTS_MAX_SECONDS {
                shorts_count += 1;
            } else {
                regular_count += 1;
            }
        }

        let total = durations.len() as f64;
        let percentages: BTreeMap<String, f64> = buckets
            .iter()
            .map(|(label, &count)| {
                let pct = if total > 0.0 {
                    f64::from(count) / total * 100.0
                } else {
                    0.0
                };
                (label.clone(), pct)
            })
            .collect();

        let average_length = if durations.is_empty() {
            0.0
        } else {
            durations.iter().map(|&d| f64::from(d)).sum::<f64>() / total
        };

        VideoLengthStats {
            user_id: user_id.to_string(),
            sample_size,
            length_buckets: buckets,
            length_percentages: percentages,
            average_length,
            median_length: median(&durations),
            shortest_video: durations.iter().copied().min().unwrap_or(0),
            longest_video: durations.iter().copied().max().unwrap_or(0),
            total_duration: durations.iter().map(|&d| u64::from(d)).sum(),
            shorts_count,
            regular_count,
            shorts_percentage: if total > 0.0 {
                f64::from(shorts_count) / total * 100.0
            } else {
                0.0
            },
            analysis_date: Utc::now(),
        }
    }

    /// Temporal liking patterns over the sampled window. Records with an
    /// unparseable `liked_at` are skipped here but still count toward
    /// every other block.
    pub fn content_trends(
        &self,
        user_id: &str,
        records: &[LikedRecord],
        sample_size: u32,
    ) -> LikedContentTrends {
        let subset = sample(records, sample_size);

        let mut by_month: BTreeMap<String, u32> = BTreeMap::new();
        let mut by_day: BTreeMap<String, u32> = BTreeMap::new();
        let mut by_hour: BTreeMap<u8, u32> = BTreeMap::new();
        let mut earliest: Option<DateTime<Utc>> = None;
        let mut latest: Option<DateTime<Utc>> = None;

        for record in subset {
            let Some(liked_at) = record.liked_at.as_deref().and_then(parse_timestamp) else {
                continue;
            };

            earliest = Some(earliest.map_or(liked_at, |e| e.min(liked_at)));
            latest = Some(latest.map_or(liked_at, |l| l.max(liked_at)));

            *by_month
                .entry(liked_at.format("%Y-%m").to_string())
                .or_insert(0) += 1;
            *by_day
                .entry(liked_at.format("%A").to_string())
                .or_insert(0) += 1;
            *by_hour.entry(liked_at.hour() as u8).or_insert(0) += 1;
        }

        // Peak liking hour, earliest hour breaking ties.
        let most_active_period = by_hour
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(&hour, _)| DayPeriod::from_hour(hour));

        let liking_frequency = match (earliest, latest) {
            (Some(start), Some(end)) => {
                let days_span = (end - start).num_days();
                if days_span > 0 {
                    subset.len() as f64 / days_span as f64
                } else {
                    0.0
                }
            }
            _ => 0.0,
        };

        LikedContentTrends {
            user_id: user_id.to_string(),
            sample_size,
            likes_by_month: by_month,
            likes_by_day_of_week: by_day,
            likes_by_hour: by_hour,
            most_active_period,
            liking_frequency,
            analysis_date: Utc::now(),
            date_range_start: earliest,
            date_range_end: latest,
        }
    }

    /// Shorts-vs-regular comparison over the sampled window, split by
    /// duration at the 60-second boundary.
    pub fn shorts_analysis(
        &self,
        user_id: &str,
        records: &[LikedRecord],
        sample_size: u32,
    ) -> ShortsAnalysis {
        let subset = sample(records, sample_size);

        let (shorts, regular): (Vec<&LikedRecord>, Vec<&LikedRecord>) = subset
            .iter()
            .partition(|r| r.duration_seconds <= SHORTS_MAX_SECONDS);

        let count_categories = |videos: &[&LikedRecord]| -> BTreeMap<VideoCategory, u32> {
            let mut counts = BTreeMap::new();
            for video in videos {
                *counts.entry(video.category()).or_insert(0) += 1;
            }
            counts
        };
        let count_channels = |videos: &[&LikedRecord]| -> BTreeMap<String, u32> {
            let mut counts = BTreeMap::new();
            for video in videos {
                if video.channel_id.is_empty() {
                    continue;
                }
                *counts.entry(video.channel_id.clone()).or_insert(0) += 1;
            }
            counts
        };
        let average_duration = |videos: &[&LikedRecord]| -> f64 {
            if videos.is_empty() {
                return 0.0;
            }
            videos
                .iter()
                .map(|v| f64::from(v.duration_seconds))
                .sum::<f64>()
                / videos.len() as f64
        };

        ShortsAnalysis {
            user_id: user_id.to_string(),
            sample_size,
            total_shorts: shorts.len() as u32,
            total_regular: regular.len() as u32,
            shorts_percentage: if subset.is_empty() {
                0.0
            } else {
                shorts.len() as f64 / subset.len() as f64 * 100.0
            },
            avg_shorts_duration: average_duration(&shorts),
            avg_regular_duration: average_duration(&regular),
            shorts_categories: count_categories(&shorts),
            regular_categories: count_categories(&regular),
            shorts_channels: count_channels(&shorts),
            regular_channels: count_channels(&regular),
            analysis_date: Utc::now(),
        }
    }

    // ── Combined snapshot ─────────────────────────────────────────────────────

    /// Compute all six blocks and the completeness summary.
    ///
    /// `videos_missing_data` counts the shortfall against the requested
    /// sample size, so `videos_with_metadata + videos_missing_data ==
    /// sample_size` holds even when fewer records are stored.
    pub fn complete_analytics(
        &self,
        user_id: &str,
        records: &[LikedRecord],
        sample_size: u32,
    ) -> LikedVideosAnalytics {
        let subset = sample(records, sample_size);
        let videos_with_metadata = subset.iter().filter(|r| !r.title.is_empty()).count() as u32;
        let videos_missing_data = sample_size - videos_with_metadata;
        let data_completeness_score = if sample_size > 0 {
            round2(f64::from(videos_with_metadata) / f64::from(sample_size) * 100.0)
        } else {
            0.0
        };

        debug!(
            user_id,
            sample_size,
            records = records.len(),
            "computing liked-videos analytics"
        );

        LikedVideosAnalytics {
            user_id: user_id.to_string(),
            sample_size,
            keyword_analysis: self.keyword_analysis(user_id, records, sample_size),
            category_stats: self.category_stats(user_id, records, sample_size),
            channel_stats: self.channel_stats(user_id, records, sample_size),
            length_stats: self.length_stats(user_id, records, sample_size),
            content_trends: self.content_trends(user_id, records, sample_size),
            shorts_analysis: self.shorts_analysis(user_id, records, sample_size),
            total_liked_videos: records.len() as u32,
            analysis_date: Utc::now(),
            last_sync_date: None,
            videos_with_metadata,
            videos_missing_data,
            data_completeness_score,
        }
    }
}

// ── Module helpers ────────────────────────────────────────────────────────────

/// The sampled window: the first `sample_size` records.
fn sample(records: &[LikedRecord], sample_size: u32) -> &[LikedRecord] {
    &records[..records.len().min(sample_size as usize)]
}

/// Median of a duration list; even-length lists average the two middles.
fn median(durations: &[u32]) -> f64 {
    if durations.is_empty() {
        return 0.0;
    }
    let mut sorted = durations.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        f64::from(sorted[mid])
    } else {
        (f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(video_id: &str, title: &str, duration: u32) -> LikedRecord {
        LikedRecord {
            video_id: video_id.to_string(),
            title: title.to_string(),
            description: String::new(),
            duration_seconds: duration,
            duration_iso: String::new(),
            category_id: String::new(),
            category_name: "Music".to_string(),
            video_type: VideoType::Regular,
            tags: Vec::new(),
            thumbnail_url: None,
            channel_id: format!("ch-{}", video_id),
            channel_title: format!("Channel {}", video_id),
            channel_url: String::new(),
            subscriber_count: None,
            view_count: None,
            like_count: None,
            comment_count: None,
            liked_at: Some("2024-01-15T10:00:00Z".to_string()),
            position_in_playlist: None,
            extracted_keywords: Vec::new(),
            synced_at: None,
            updated_at: None,
        }
    }

    fn processor() -> LikedVideosProcessor {
        LikedVideosProcessor::new()
    }

    // ── categorize_video_length ───────────────────────────────────────────────

    #[test]
    fn test_length_bucket_boundaries() {
        assert_eq!(LikedVideosProcessor::categorize_video_length(0), "0-60");
        assert_eq!(LikedVideosProcessor::categorize_video_length(59), "0-60");
        assert_eq!(LikedVideosProcessor::categorize_video_length(60), "60-300");
        assert_eq!(LikedVideosProcessor::categorize_video_length(300), "300-600");
        assert_eq!(
            LikedVideosProcessor::categorize_video_length(1799),
            "600-1800"
        );
        assert_eq!(LikedVideosProcessor::categorize_video_length(1800), "1800+");
        assert_eq!(LikedVideosProcessor::categorize_video_length(7200), "1800+");
    }

    // ── is_short ──────────────────────────────────────────────────────────────

    #[test]
    fn test_is_short_by_duration_or_type() {
        let short = make_record("a", "t", 45);
        assert!(LikedVideosProcessor::is_short(&short));

        let mut long_marked_short = make_record("b", "t", 120);
        long_marked_short.video_type = VideoType::Short;
        assert!(LikedVideosProcessor::is_short(&long_marked_short));

        let regular = make_record("c", "t", 120);
        assert!(!LikedVideosProcessor::is_short(&regular));
    }

    // ── keyword_analysis ──────────────────────────────────────────────────────

    #[test]
    fn test_keyword_analysis_counts_across_videos() {
        let records = vec![
            make_record("a", "rust tutorial basics", 120),
            make_record("b", "rust advanced patterns", 120),
        ];
        let analysis = processor().keyword_analysis("u1", &records, 100);

        assert_eq!(analysis.top_keywords[0].keyword, "rust");
        assert_eq!(analysis.top_keywords[0].count, 2);
        assert!(analysis.average_keywords_per_video > 0.0);
    }

    #[test]
    fn test_keyword_analysis_groups_by_category() {
        let mut gaming = make_record("a", "speedrun glitches explained", 120);
        gaming.category_name = "Gaming".to_string();
        let records = vec![gaming, make_record("b", "piano concerto", 120)];

        let analysis = processor().keyword_analysis("u1", &records, 100);
        assert!(analysis.keyword_categories[&VideoCategory::Gaming]
            .contains(&"speedrun".to_string()));
        assert!(analysis.keyword_categories[&VideoCategory::Music]
            .contains(&"piano".to_string()));
    }

    #[test]
    fn test_keyword_analysis_empty_records() {
        let analysis = processor().keyword_analysis("u1", &[], 100);
        assert!(analysis.top_keywords.is_empty());
        assert_eq!(analysis.average_keywords_per_video, 0.0);
    }

    // ── category_stats ────────────────────────────────────────────────────────

    #[test]
    fn test_category_stats_distribution() {
        let mut other = make_record("c", "t", 60);
        other.category_name = "Unknown Genre".to_string();
        let records = vec![
            make_record("a", "t", 120),
            make_record("b", "t", 180),
            other,
        ];
        let stats = processor().category_stats("u1", &records, 100);

        assert_eq!(stats.category_counts[&VideoCategory::Music], 2);
        assert_eq!(stats.category_counts[&VideoCategory::Other], 1);
        assert!((stats.category_percentages[&VideoCategory::Music] - 66.666).abs() < 0.01);
        assert_eq!(stats.category_total_duration[&VideoCategory::Music], 300);
        assert_eq!(stats.top_categories[0], VideoCategory::Music);
    }

    // ── channel_stats ─────────────────────────────────────────────────────────

    #[test]
    fn test_channel_stats_counts_and_top() {
        let mut records = vec![
            make_record("a", "t", 120),
            make_record("b", "t", 120),
            make_record("c", "t", 120),
        ];
        records[1].channel_id = records[0].channel_id.clone();
        let stats = processor().channel_stats("u1", &records, 100);

        assert_eq!(stats.total_unique_channels, 2);
        assert_eq!(stats.channel_like_counts[&records[0].channel_id], 2);
        assert_eq!(stats.top_channels[0], records[0].channel_id);
        assert!((stats.average_likes_per_channel - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_channel_diversity_single_channel() {
        let mut records = vec![make_record("a", "t", 120), make_record("b", "t", 120)];
        records[1].channel_id = records[0].channel_id.clone();
        let stats = processor().channel_stats("u1", &records, 100);
        // One channel holding the full share: -1 * sqrt(1) = -1.
        assert!((stats.channel_diversity_score - (-1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_channel_diversity_two_even_channels() {
        let records = vec![make_record("a", "t", 120), make_record("b", "t", 120)];
        let stats = processor().channel_stats("u1", &records, 100);
        // Two channels at p = 0.5: -2 * 0.5 * sqrt(0.5).
        let expected = -2.0 * 0.5 * 0.5f64.sqrt();
        assert!((stats.channel_diversity_score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_channel_stats_skips_records_without_channel() {
        let mut record = make_record("a", "t", 120);
        record.channel_id = String::new();
        let stats = processor().channel_stats("u1", &[record], 100);
        assert_eq!(stats.total_unique_channels, 0);
        assert_eq!(stats.average_likes_per_channel, 0.0);
    }

    // ── length_stats ──────────────────────────────────────────────────────────

    #[test]
    fn test_length_stats_all_buckets_present() {
        let stats = processor().length_stats("u1", &[], 100);
        assert_eq!(stats.length_buckets.len(), 5);
        for count in stats.length_buckets.values() {
            assert_eq!(*count, 0);
        }
        assert_eq!(stats.length_percentages.len(), 5);
    }

    #[test]
    fn test_length_stats_summary_values() {
        let records = vec![
            make_record("a", "t", 30),
            make_record("b", "t", 120),
            make_record("c", "t", 600),
        ];
        let stats = processor().length_stats("u1", &records, 100);

        assert_eq!(stats.length_buckets["0-60"], 1);
        assert_eq!(stats.length_buckets["60-300"], 1);
        assert_eq!(stats.length_buckets["300-600"], 0);
        assert_eq!(stats.length_buckets["600-1800"], 1);
        assert_eq!(stats.shortest_video, 30);
        assert_eq!(stats.longest_video, 600);
        assert_eq!(stats.total_duration, 750);
        assert!((stats.average_length - 250.0).abs() < 1e-9);
        assert!((stats.median_length - 120.0).abs() < 1e-9);
        assert_eq!(stats.shorts_count, 1);
        assert_eq!(stats.regular_count, 2);
    }

    #[test]
    fn test_length_stats_median_even_count() {
        let records = vec![make_record("a", "t", 100), make_record("b", "t", 200)];
        let stats = processor().length_stats("u1", &records, 100);
        assert!((stats.median_length - 150.0).abs() < 1e-9);
    }

    // ── content_trends ────────────────────────────────────────────────────────

    #[test]
    fn test_content_trends_grouping() {
        let mut records = vec![
            make_record("a", "t", 120),
            make_record("b", "t", 120),
            make_record("c", "t", 120),
        ];
        records[0].liked_at = Some("2024-01-15T10:00:00Z".to_string());
        records[1].liked_at = Some("2024-01-20T14:00:00Z".to_string());
        records[2].liked_at = Some("2024-02-01T14:30:00Z".to_string());

        let trends = processor().content_trends("u1", &records, 100);
        assert_eq!(trends.likes_by_month["2024-01"], 2);
        assert_eq!(trends.likes_by_month["2024-02"], 1);
        // 2024-01-15 was a Monday.
        assert_eq!(trends.likes_by_day_of_week["Monday"], 1);
        assert_eq!(trends.likes_by_hour[&14], 2);
        // Peak hour 14 falls in the afternoon quadrant.
        assert_eq!(trends.most_active_period, Some(DayPeriod::Afternoon));
    }

    #[test]
    fn test_content_trends_skips_bad_timestamps() {
        let mut records = vec![make_record("a", "t", 120), make_record("b", "t", 120)];
        records[1].liked_at = Some("not a date".to_string());

        let trends = processor().content_trends("u1", &records, 100);
        let total: u32 = trends.likes_by_hour.values().sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_content_trends_no_timestamps() {
        let mut record = make_record("a", "t", 120);
        record.liked_at = None;
        let trends = processor().content_trends("u1", &[record], 100);

        assert!(trends.most_active_period.is_none());
        assert!(trends.date_range_start.is_none());
        assert_eq!(trends.liking_frequency, 0.0);
    }

    #[test]
    fn test_content_trends_liking_frequency() {
        let mut records = vec![make_record("a", "t", 120), make_record("b", "t", 120)];
        records[0].liked_at = Some("2024-01-01T10:00:00Z".to_string());
        records[1].liked_at = Some("2024-01-05T10:00:00Z".to_string());

        let trends = processor().content_trends("u1", &records, 100);
        // 2 likes over a 4-day span.
        assert!((trends.liking_frequency - 0.5).abs() < 1e-9);
    }

    // ── shorts_analysis ───────────────────────────────────────────────────────

    #[test]
    fn test_shorts_analysis_split() {
        let records = vec![
            make_record("a", "t", 45),
            make_record("b", "t", 60),
            make_record("c", "t", 300),
        ];
        let analysis = processor().shorts_analysis("u1", &records, 100);

        assert_eq!(analysis.total_shorts, 2);
        assert_eq!(analysis.total_regular, 1);
        assert!((analysis.shorts_percentage - 66.666).abs() < 0.01);
        assert!((analysis.avg_shorts_duration - 52.5).abs() < 1e-9);
        assert!((analysis.avg_regular_duration - 300.0).abs() < 1e-9);
        assert_eq!(analysis.shorts_categories[&VideoCategory::Music], 2);
    }

    #[test]
    fn test_shorts_analysis_empty() {
        let analysis = processor().shorts_analysis("u1", &[], 100);
        assert_eq!(analysis.total_shorts, 0);
        assert_eq!(analysis.shorts_percentage, 0.0);
        assert_eq!(analysis.avg_shorts_duration, 0.0);
    }

    // ── complete_analytics ────────────────────────────────────────────────────

    #[test]
    fn test_complete_analytics_completeness_invariant() {
        let mut records = vec![
            make_record("a", "has title", 120),
            make_record("b", "", 120),
        ];
        records[1].title = String::new();

        let analytics = processor().complete_analytics("u1", &records, 100);
        assert_eq!(analytics.videos_with_metadata, 1);
        assert_eq!(analytics.videos_missing_data, 99);
        assert_eq!(
            analytics.videos_with_metadata + analytics.videos_missing_data,
            analytics.sample_size
        );
        assert!((analytics.data_completeness_score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_complete_analytics_full_sample() {
        let records: Vec<LikedRecord> = (0..50)
            .map(|i| make_record(&format!("v{}", i), "title", 120))
            .collect();
        let analytics = processor().complete_analytics("u1", &records, 50);

        assert_eq!(analytics.videos_with_metadata, 50);
        assert_eq!(analytics.videos_missing_data, 0);
        assert!((analytics.data_completeness_score - 100.0).abs() < 1e-9);
        assert_eq!(analytics.total_liked_videos, 50);
    }

    #[test]
    fn test_complete_analytics_respects_sample_window() {
        // 10 records stored, but only the first 5 are sampled.
        let records: Vec<LikedRecord> = (0..10)
            .map(|i| make_record(&format!("v{}", i), "title", 120))
            .collect();
        let analytics = processor().complete_analytics("u1", &records, 5);

        assert_eq!(analytics.total_liked_videos, 10);
        assert_eq!(analytics.videos_with_metadata, 5);
        assert_eq!(analytics.length_stats.length_buckets["60-300"], 5);
    }
}
