use chrono::{DateTime, Utc};

/// Text form of a `TIMESTAMPTZ` cast to `text` under the default ISO date style,
/// e.g. `2024-03-01 09:30:00.123456+00`.
pub const UPDATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%#z";

/// Lenient decode of the nullable `updated_at` column. A value that does not
/// parse is logged and treated as absent rather than failing the read.
pub fn parse_updated_at(entity: &'static str, id: i64, raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match DateTime::parse_from_str(raw, UPDATED_AT_FORMAT) {
        Ok(at) => Some(at.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!(entity, id, value = raw, error = %e, "unable to parse updated_at value");
            None
        }
    }
}
