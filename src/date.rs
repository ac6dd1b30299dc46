//! Conversion from the operator's prompt format to the wire instant format.

use chrono::{Local, NaiveDateTime, TimeZone, Utc};

/// Prompt format, e.g. `03-Feb-2024 14:00:00`, read in local time.
pub const PROMPT_FORMAT: &str = "%d-%b-%Y %H:%M:%S";

/// Parses an operator-entered local timestamp and renders the RFC3339 UTC
/// instant (`...Z`) the search endpoint requires for its publication bounds.
pub fn local_to_rfc3339_utc(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    let naive = NaiveDateTime::parse_from_str(trimmed, PROMPT_FORMAT).map_err(|e| {
        format!(
            "invalid date-time '{}': {} (expected dd-Mon-yyyy hh:mm:ss)",
            trimmed, e
        )
    })?;
    let local = Local
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| format!("ambiguous or skipped local date-time '{}'", trimmed))?;
    Ok(local
        .with_timezone(&Utc)
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string())
}
