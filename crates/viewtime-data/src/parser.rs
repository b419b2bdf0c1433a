//! Google Takeout watch-history parsing.
//!
//! Converts a raw export payload (plain JSON or a ZIP archive containing
//! the JSON export) into a normalized, strictly-typed sequence of
//! [`WatchEvent`]s. All field-presence and sanity checks live here; code
//! past this boundary treats events as already validated.

use std::io::{Cursor, Read};

use serde_json::Value;
use tracing::debug;
use viewtime_core::classify::SourceClassifier;
use viewtime_core::error::{Result, ViewtimeError};
use viewtime_core::models::WatchEvent;
use viewtime_core::timestamps::parse_timestamp_value;

/// Marker identifying a watch record among other Takeout activity rows.
const WATCHED_MARKER: &str = "Watched";

/// Wrapper key some exports use around the record list.
const WRAPPER_KEY: &str = "watchHistory";

/// Parses Takeout watch-history exports into [`WatchEvent`]s.
pub struct TakeoutParser {
    classifier: SourceClassifier,
}

impl Default for TakeoutParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TakeoutParser {
    pub fn new() -> Self {
        Self {
            classifier: SourceClassifier::default(),
        }
    }

    /// Build a parser with a custom provenance rule set.
    pub fn with_classifier(classifier: SourceClassifier) -> Self {
        Self { classifier }
    }

    // ── Public API ────────────────────────────────────────────────────────────

    /// Parse raw export bytes into watch events, newest first.
    ///
    /// `filename` decides the container format: a `.zip` suffix selects
    /// archive handling, anything else is treated as a plain JSON
    /// document. Records that are not watch events, lack a parseable
    /// timestamp, or yield no video id are dropped silently; a payload
    /// whose top level is neither a list nor the expected wrapper object
    /// parses to an empty list.
    ///
    /// # Errors
    ///
    /// [`ViewtimeError::Format`] when the bytes are not valid UTF-8/JSON
    /// or a ZIP archive contains no JSON member.
    pub fn parse(&self, user_id: &str, file_bytes: &[u8], filename: &str) -> Result<Vec<WatchEvent>> {
        let payload = self.load_payload(file_bytes, filename)?;

        let records: &[Value] = match &payload {
            Value::Array(items) => items.as_slice(),
            Value::Object(map) => map
                .get(WRAPPER_KEY)
                .and_then(|v| v.as_array())
                .map(|items| items.as_slice())
                .unwrap_or(&[]),
            _ => &[],
        };

        let mut events: Vec<WatchEvent> = records
            .iter()
            .filter_map(|entry| self.convert_entry(user_id, entry))
            .collect();

        // Newest first for presentation consistency; callers needing
        // ascending order re-sort explicitly.
        events.sort_by(|a, b| b.watched_at.cmp(&a.watched_at));

        debug!(
            "parsed {} watch events from {} raw records in {}",
            events.len(),
            records.len(),
            filename
        );
        Ok(events)
    }

    // ── Payload loading ───────────────────────────────────────────────────────

    fn load_payload(&self, file_bytes: &[u8], filename: &str) -> Result<Value> {
        if filename.ends_with(".zip") {
            return self.load_zip_payload(file_bytes);
        }

        let text = std::str::from_utf8(file_bytes)
            .map_err(|_| ViewtimeError::Format("upload is not valid UTF-8".to_string()))?;
        serde_json::from_str(text)
            .map_err(|e| ViewtimeError::Format(format!("upload is not valid JSON: {}", e)))
    }

    fn load_zip_payload(&self, file_bytes: &[u8]) -> Result<Value> {
        let mut archive = zip::ZipArchive::new(Cursor::new(file_bytes))
            .map_err(|e| ViewtimeError::Format(format!("could not open ZIP archive: {}", e)))?;

        let json_member = archive
            .file_names()
            .find(|name| name.ends_with(".json"))
            .map(String::from)
            .ok_or_else(|| {
                ViewtimeError::Format(
                    "ZIP archive does not contain a JSON watch-history file".to_string(),
                )
            })?;

        let mut member = archive
            .by_name(&json_member)
            .map_err(|e| ViewtimeError::Format(format!("could not read ZIP member: {}", e)))?;
        let mut text = String::new();
        member
            .read_to_string(&mut text)
            .map_err(|_| ViewtimeError::Format("ZIP member is not valid UTF-8".to_string()))?;

        serde_json::from_str(&text)
            .map_err(|e| ViewtimeError::Format(format!("ZIP member is not valid JSON: {}", e)))
    }

    // ── Record conversion ─────────────────────────────────────────────────────

    fn convert_entry(&self, user_id: &str, entry: &Value) -> Option<WatchEvent> {
        let title = entry.get("title").and_then(|v| v.as_str()).unwrap_or("");
        if !title.contains(WATCHED_MARKER) {
            return None;
        }

        let watched_at = parse_timestamp_value(entry.get("time")?)?;

        let url = entry
            .get("titleUrl")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let video_id = url.as_deref().and_then(extract_video_id)?;

        let detail_labels: Vec<String> = entry
            .get("details")
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.get("name").and_then(|v| v.as_str()))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let (source, source_detail) = self.classifier.classify(&detail_labels);

        let is_short = url.as_deref().is_some_and(is_short_url);

        Some(WatchEvent {
            user_id: user_id.to_string(),
            video_id,
            title: strip_title_prefix(title),
            channel_title: channel_from_subtitles(entry.get("subtitles")),
            watched_at,
            source,
            source_detail,
            url,
            duration_seconds: None,
            is_short,
        })
    }
}

// ── Field helpers ─────────────────────────────────────────────────────────────

/// Remove the `Watched ` wrapper phrase and surrounding quote characters.
fn strip_title_prefix(title: &str) -> String {
    match title.strip_prefix("Watched ") {
        Some(rest) => rest.trim().trim_matches('"').to_string(),
        None => title.to_string(),
    }
}

/// First populated subtitle name, or the literal placeholder.
fn channel_from_subtitles(subtitles: Option<&Value>) -> String {
    subtitles
        .and_then(|v| v.as_array())
        .and_then(|items| {
            items
                .iter()
                .filter_map(|item| item.get("name").and_then(|v| v.as_str()))
                .find(|name| !name.is_empty())
        })
        .unwrap_or("Unknown channel")
        .to_string()
}

/// Extract the video id from a Takeout record URL.
///
/// Canonical watch URLs carry the id in the `v` query parameter; shorts
/// URLs carry it as the path segment after `/shorts/`; anything else
/// falls back to the last non-empty path segment.
fn extract_video_id(url: &str) -> Option<String> {
    let (without_query, query) = match url.split_once('?') {
        Some((head, tail)) => (head, Some(tail)),
        None => (url, None),
    };
    let path = url_path(without_query);

    if path.contains("watch") {
        let query = query?;
        return query.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == "v" && !value.is_empty()).then(|| value.to_string())
        });
    }

    if let Some(idx) = path.find("/shorts/") {
        let tail = &path[idx + "/shorts/".len()..];
        let id = tail.split('/').next().unwrap_or("");
        return (!id.is_empty()).then(|| id.to_string());
    }

    path.trim_matches('/')
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// The path portion of a URL, without scheme, host or query.
fn url_path(without_query: &str) -> &str {
    let after_scheme = without_query
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(without_query);
    match after_scheme.find('/') {
        Some(idx) => &after_scheme[idx..],
        None => "",
    }
}

/// True iff the URL identifies a short-form video.
fn is_short_url(url: &str) -> bool {
    url.contains("/shorts/") || url.contains("youtube.com/shorts")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
