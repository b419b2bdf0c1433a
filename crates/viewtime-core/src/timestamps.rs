//! Timestamp parsing for the formats found in Takeout exports and API
//! responses.

use chrono::{DateTime, TimeZone, Utc};
use tracing::warn;

/// Attempt to parse a timestamp string into a UTC [`DateTime`].
///
/// Handles the `Z`-suffixed ISO 8601 form Takeout uses, any RFC 3339
/// offset form, and a few common naive date-time patterns (interpreted
/// as UTC). Returns `None` for empty or unrecognised strings.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }

    // Replace trailing 'Z' with '+00:00' for RFC 3339 compatibility.
    let normalised = if let Some(stripped) = s.strip_suffix('Z') {
        format!("{}+00:00", stripped)
    } else {
        s.to_string()
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
        return Some(dt.with_timezone(&Utc));
    }

    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ];
    for fmt in FORMATS {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    // Date-only form.
    if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let naive = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&naive));
    }

    warn!("could not parse timestamp string \"{}\"", s);
    None
}

/// Parse the timestamp field of a raw JSON record.
///
/// Only string values are accepted; everything else is `None`.
pub fn parse_timestamp_value(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    value.as_str().and_then(parse_timestamp)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
