use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// Istante corrente in UTC.
pub fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// Formatta come RFC3339 (es. "2025-11-02T12:34:56.123456789Z").
/// Mantiene la parte frazionaria così due scritture ravvicinate restano distinguibili.
pub fn format_timestamp(ts: OffsetDateTime) -> Result<String, time::error::Format> {
    ts.format(&Rfc3339)
}

pub fn parse_timestamp(raw: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(raw, &Rfc3339)
}
