//! Database utility functions.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use super::{DbError, DbResult};

/// Current time truncated to milliseconds, the precision both backends keep.
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
///
/// The fixed width makes the stored text sort chronologically, which the
/// relational `ORDER BY created_at` relies on.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a timestamp written by [`format_timestamp`].
pub fn parse_timestamp(s: &str) -> DbResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DbError::InvalidData {
            message: format!("bad timestamp '{}': {}", s, e),
        })
}
