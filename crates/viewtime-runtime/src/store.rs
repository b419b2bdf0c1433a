//! Persistence gateway for viewtime.
//!
//! The core only requires get/put of JSON values under deterministic
//! per-user, per-artifact keys; [`JsonStore`] captures exactly that.
//! Writes are whole-value overwrites with no transactional guarantees.
//! [`MemoryStore`] backs tests and ephemeral runs, [`FileStore`] keeps
//! one document per key under a directory.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use viewtime_core::error::Result;

// ── JsonStore ─────────────────────────────────────────────────────────────────

/// Opaque key-value store of JSON documents.
#[async_trait]
pub trait JsonStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: Value) -> Result<()>;

    /// Fetch the value stored under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<Value>>;
}

// ── MemoryStore ───────────────────────────────────────────────────────────────

/// In-memory [`JsonStore`] for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JsonStore for MemoryStore {
    async fn put(&self, key: &str, value: Value) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.read().await.get(key).cloned())
    }
}

// ── FileStore ─────────────────────────────────────────────────────────────────

/// File-backed [`JsonStore`]: one pretty-printed JSON document per key.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if absent.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are internal deterministic strings, but sanitise anyway so
        // a key can never escape the store directory.
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{}.json", safe))
    }
}

#[async_trait]
impl JsonStore for FileStore {
    async fn put(&self, key: &str, value: Value) -> Result<()> {
        let path = self.path_for(key);
        let bytes = serde_json::to_vec_pretty(&value)?;
        tokio::fs::write(&path, bytes).await?;
        debug!("wrote {} to {}", key, path.display());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── MemoryStore ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        store.put("k1", json!({"a": 1})).await.unwrap();
        let value = store.get("k1").await.unwrap();
        assert_eq!(value, Some(json!({"a": 1})));
    }

    #[tokio::test]
    async fn test_memory_store_missing_key() {
        let store = MemoryStore::new();
        assert!(store.get("absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_overwrites() {
        let store = MemoryStore::new();
        store.put("k1", json!(1)).await.unwrap();
        store.put("k1", json!(2)).await.unwrap();
        assert_eq!(store.get("k1").await.unwrap(), Some(json!(2)));
    }

    // ── FileStore ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        store
            .put("watch_history_events_u1", json!({"events": []}))
            .await
            .unwrap();
        let value = store.get("watch_history_events_u1").await.unwrap();
        assert_eq!(value, Some(json!({"events": []})));
    }

    #[tokio::test]
    async fn test_file_store_missing_key() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        assert!(store.get("absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        {
            let store = FileStore::new(dir.path()).unwrap();
            store.put("k1", json!("persisted")).await.unwrap();
        }
        let reopened = FileStore::new(dir.path()).unwrap();
        assert_eq!(
            reopened.get("k1").await.unwrap(),
            Some(json!("persisted"))
        );
    }

    #[tokio::test]
    async fn test_file_store_sanitises_keys() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        store.put("../escape/attempt", json!(1)).await.unwrap();
        // The document must land inside the store root.
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(store.get("../escape/attempt").await.unwrap(), Some(json!(1)));
    }
}
