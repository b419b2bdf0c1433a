use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Default root for viewtime's file-backed store: `~/.viewtime/store`.
pub fn default_store_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".viewtime").join("store")
}

/// Ensure the `~/.viewtime/` directory hierarchy exists.
pub fn ensure_directories(store_dir: &PathBuf) -> anyhow::Result<()> {
    std::fs::create_dir_all(store_dir)?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive;
/// unrecognised values fall back to `"info"`. All output goes to stderr so
/// analytics printed on stdout stay pipeable.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let directive = match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "WARNING" => "warn",
        "ERROR" => "error",
        _ => "info",
    };

    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry().with(filter).with(layer).init();
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_directories_creates_nested_path() {
        let tmp = TempDir::new().expect("tempdir");
        let store = tmp.path().join("deep").join("store");

        ensure_directories(&store).expect("ensure_directories should succeed");
        assert!(store.is_dir());
    }

    #[test]
    fn test_default_store_dir_is_under_home() {
        let dir = default_store_dir();
        assert!(dir.ends_with(".viewtime/store"));
    }
}
