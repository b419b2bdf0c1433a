mod bootstrap;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use viewtime_core::liked_models::LikedRecord;
use viewtime_core::models::WatchHistoryAnalytics;
use viewtime_core::settings::Settings;
use viewtime_runtime::liked_videos::LikedVideosManager;
use viewtime_runtime::store::FileStore;
use viewtime_runtime::watch_history::WatchHistoryManager;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::parse();

    let store_dir = settings
        .store_dir
        .clone()
        .unwrap_or_else(bootstrap::default_store_dir);
    bootstrap::ensure_directories(&store_dir)?;
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("viewtime v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("store: {}", store_dir.display());

    let store = Arc::new(FileStore::new(&store_dir)?);

    match (&settings.takeout, &settings.liked) {
        (Some(takeout_path), _) => {
            let manager = WatchHistoryManager::new(store);
            let bytes = std::fs::read(takeout_path)
                .with_context(|| format!("could not read {}", takeout_path.display()))?;
            let filename = takeout_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "upload.json".to_string());

            let outcome = manager
                .ingest_takeout(&settings.user, &bytes, &filename)
                .await?;
            tracing::info!(
                "processed {} watch events for {}",
                outcome.events_processed,
                settings.user
            );

            let analytics = manager
                .analytics(&settings.user)
                .await?
                .context("analytics missing after a successful upload")?;

            if settings.json {
                println!("{}", serde_json::to_string_pretty(&analytics)?);
            } else {
                print_watch_summary(&analytics);
            }
        }

        (None, Some(liked_path)) => {
            let manager = LikedVideosManager::new(store);
            let bytes = std::fs::read(liked_path)
                .with_context(|| format!("could not read {}", liked_path.display()))?;
            let records: Vec<LikedRecord> =
                serde_json::from_slice(&bytes).context("liked-videos file is not a JSON list")?;

            manager.store_batch(&settings.user, records).await?;
            let analytics = manager
                .generate_analytics(&settings.user, settings.sample_size)
                .await?
                .context("no liked videos to analyse")?;

            if settings.json {
                println!("{}", serde_json::to_string_pretty(&analytics)?);
            } else {
                println!(
                    "liked videos: {} sampled at {}, completeness {:.1}%",
                    analytics.total_liked_videos,
                    analytics.sample_size,
                    analytics.data_completeness_score
                );
                println!(
                    "shorts {} / regular {} ({:.1}% shorts)",
                    analytics.shorts_analysis.total_shorts,
                    analytics.shorts_analysis.total_regular,
                    analytics.shorts_analysis.shorts_percentage
                );
                for keyword in analytics.keyword_analysis.top_keywords.iter().take(10) {
                    println!("  {:>4}  {}", keyword.count, keyword.keyword);
                }
            }
        }

        (None, None) => {
            bail!("nothing to do: pass --takeout <file> or --liked <file>");
        }
    }

    Ok(())
}

fn print_watch_summary(analytics: &WatchHistoryAnalytics) {
    println!(
        "{} events, {} videos, {} channels",
        analytics.total_events, analytics.unique_videos, analytics.unique_channels
    );
    println!(
        "sessions: avg {:.1} min, {:.1} videos/session, longest {:.1} min",
        analytics.average_session_duration_minutes,
        analytics.average_videos_per_session,
        analytics.longest_session_minutes
    );
    println!(
        "source: {:.1}% algorithmic / {:.1}% intentional, {:.1}% shorts",
        analytics.algorithmic_view_share * 100.0,
        analytics.intentional_view_share * 100.0,
        analytics.shorts_share * 100.0
    );
    println!(
        "time: {:.1} min/day, {:.1} min/week",
        analytics.daily_average_minutes, analytics.weekly_minutes
    );
    if !analytics.repeat_views.is_empty() {
        println!("repeat views:");
        for repeat in &analytics.repeat_views {
            println!("  {:>3}x  {}", repeat.watch_count, repeat.title);
        }
    }
}
