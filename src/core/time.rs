use time::macros::format_description;
use time::{
    format_description::well_known::Rfc3339, Date, OffsetDateTime, PrimitiveDateTime, Time,
    UtcOffset,
};

pub(crate) fn primitive_now_utc() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

pub(crate) fn format_primitive(value: PrimitiveDateTime) -> String {
    value.assume_utc().format(&Rfc3339).unwrap_or_else(|_| value.assume_utc().to_string())
}

/// `October 17, 2026`
pub(crate) fn format_long_date(value: Date) -> String {
    let format = format_description!("[month repr:long] [day padding:none], [year]");
    value.format(&format).unwrap_or_else(|_| value.to_string())
}

/// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub(crate) fn parse_date_or_datetime(raw: &str) -> Option<PrimitiveDateTime> {
    let raw = raw.trim();

    if let Ok(value) = OffsetDateTime::parse(raw, &Rfc3339) {
        let utc = value.to_offset(UtcOffset::UTC);
        return Some(PrimitiveDateTime::new(utc.date(), utc.time()));
    }

    let date_only = format_description!("[year]-[month]-[day]");
    Date::parse(raw, &date_only).ok().map(|date| PrimitiveDateTime::new(date, Time::MIDNIGHT))
}
