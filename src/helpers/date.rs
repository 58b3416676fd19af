//! Date helper functions

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Format date in full format (like "January 2, 2024")
pub fn full_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Midnight UTC on `date`
pub fn start_of_day_utc(date: &NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::default()))
}

/// RFC 2822 timestamp, as used by RSS (`Mon, 01 Jan 2024 00:00:00 +0000`)
pub fn rfc2822<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%a, %d %b %Y %H:%M:%S %z").to_string()
}
