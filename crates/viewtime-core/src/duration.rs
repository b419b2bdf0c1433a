//! ISO 8601 duration parsing for video-metadata responses.

use regex::Regex;

/// Parse an ISO 8601 `PT#H#M#S` duration string into whole seconds.
///
/// Missing components default to 0; strings that do not start with the
/// `PT` prefix parse to 0 total. This mirrors how the metadata API is
/// consumed: a malformed duration degrades to "unknown length" instead
/// of failing the whole sync.
pub fn parse_iso8601_duration(value: &str) -> u32 {
    let re = Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("regex is valid");
    let Some(caps) = re.captures(value) else {
        return 0;
    };

    let component = |idx: usize| -> u32 {
        caps.get(idx)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0)
    };

    let hours = component(1);
    let minutes = component(2);
    let seconds = component(3);
    hours * 3600 + minutes * 60 + seconds
}

// ── Tests ─────────────────────────────────────────────────────────────────────
