//! Textual time codec shared by the generator and generated code.
//!
//! Modification times are embedded as RFC 3339 strings so the generated
//! source stays legible.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a timestamp the way it is embedded in generated code.
pub fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse an embedded timestamp.
pub fn parse_time(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text).map(|time| time.with_timezone(&Utc))
}

/// Parse a timestamp written by [`format_time`].
///
/// # Panics
///
/// Panics if `text` is not valid RFC 3339. Generated code only passes
/// strings produced by [`format_time`], so a failure means the generated
/// file was edited or corrupted.
pub fn must_parse_time(text: &str) -> DateTime<Utc> {
    match parse_time(text) {
        Ok(time) => time,
        Err(err) => panic!("invalid embedded timestamp {text:?}: {err}"),
    }
}
