use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// YouTube viewing-behaviour analytics from Takeout exports and liked videos
#[derive(Parser, Debug, Clone)]
#[command(
    name = "viewtime",
    about = "YouTube viewing-behaviour analytics from Takeout exports and liked videos",
    version
)]
pub struct Settings {
    /// Google Takeout watch-history export to ingest (.json or .zip)
    #[arg(long)]
    pub takeout: Option<PathBuf>,

    /// Liked-videos sample to analyse (JSON list of records)
    #[arg(long)]
    pub liked: Option<PathBuf>,

    /// User id the analytics are computed for
    #[arg(long, default_value = "local")]
    pub user: String,

    /// Liked-videos sample size (snapped to 50/100/150/200/250)
    #[arg(long, default_value = "100")]
    pub sample_size: u32,

    /// Directory for the file-backed store (defaults to ~/.viewtime/store)
    #[arg(long)]
    pub store_dir: Option<PathBuf>,

    /// Print the full analytics snapshot as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::parse_from(["viewtime"]);
        assert_eq!(settings.user, "local");
        assert_eq!(settings.sample_size, 100);
        assert_eq!(settings.log_level, "INFO");
        assert!(settings.takeout.is_none());
        assert!(!settings.json);
    }

    #[test]
    fn test_takeout_flag() {
        let settings = Settings::parse_from(["viewtime", "--takeout", "history.zip"]);
        assert_eq!(settings.takeout.unwrap(), PathBuf::from("history.zip"));
    }

    #[test]
    fn test_sample_size_flag() {
        let settings =
            Settings::parse_from(["viewtime", "--liked", "liked.json", "--sample-size", "250"]);
        assert_eq!(settings.sample_size, 250);
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let result = Settings::try_parse_from(["viewtime", "--log-level", "TRACE"]);
        assert!(result.is_err());
    }
}
