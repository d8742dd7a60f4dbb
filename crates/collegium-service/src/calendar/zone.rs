//! Conversions between campus wall-clock time and UTC instants.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

/// ## Summary
/// Converts a campus wall-clock time to an instant.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant. Times
/// skipped by a DST jump are shifted by the offset in force before the gap.
#[must_use]
pub fn local_to_utc(zone: Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(local) | LocalResult::Ambiguous(local, _) => local.with_timezone(&Utc),
        LocalResult::None => {
            let offset = zone.offset_from_utc_datetime(&naive).fix();
            (naive - TimeDelta::seconds(i64::from(offset.local_minus_utc()))).and_utc()
        }
    }
}

/// Combines a campus calendar date with a time of day.
#[must_use]
pub fn at_local(zone: Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    local_to_utc(zone, date.and_time(time))
}

/// Returns the campus calendar date an instant falls on.
#[must_use]
pub fn local_date(zone: Tz, instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&zone).date_naive()
}

/// Returns the instant of the last second of a campus calendar date.
#[must_use]
pub fn end_of_day(zone: Tz, date: NaiveDate) -> DateTime<Utc> {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    at_local(zone, date, last_second)
}
