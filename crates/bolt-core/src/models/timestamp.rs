//! Calendar view of the ISO-8601 strings records carry.
//!
//! Records keep timestamps as opaque strings; callers that need arithmetic
//! parse them here, on top of the schema engine.

use chrono::{DateTime, FixedOffset, Utc};

pub fn parse(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok()
}

pub fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    parse(raw).map(|dt| dt.with_timezone(&Utc))
}
