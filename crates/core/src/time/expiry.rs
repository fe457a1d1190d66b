use crate::domain::features::DayOfWeek;
use anyhow::Context;
use chrono::{DateTime, Datelike, FixedOffset, Local, TimeZone, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days until `expiry_date`, rounded up. Negative once the product has expired.
pub fn days_to_expiry<Tz: TimeZone>(expiry_date: DateTime<Utc>, now: &DateTime<Tz>) -> i64 {
    let millis = expiry_date
        .signed_duration_since(now.with_timezone(&Utc))
        .num_milliseconds();

    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
        days
    } else {
        days + 1
    }
}

/// Weekday of `now` as seen in its own timezone.
pub fn day_of_week<Tz: TimeZone>(now: &DateTime<Tz>) -> DayOfWeek {
    now.weekday().into()
}

/// Parses an RFC 3339 override, or returns the current local time.
pub fn resolve_now(now_arg: Option<&str>) -> anyhow::Result<DateTime<FixedOffset>> {
    if let Some(s) = now_arg {
        return DateTime::parse_from_rfc3339(s.trim())
            .with_context(|| format!("invalid RFC 3339 timestamp: {s}"));
    }

    Ok(Local::now().fixed_offset())
}
