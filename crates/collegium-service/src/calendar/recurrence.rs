//! Recurrence rules, parsed once and evaluated against instant windows.
//!
//! Rules are anchored in the campus zone, so a class at 09:00 stays at 09:00
//! across DST changes. An `UNTIL` with a `Z` suffix is a real instant; a
//! floating `UNTIL` is read as campus wall-clock time.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use chrono_tz::Tz;
use collegium_core::constants::DEFAULT_MAX_OCCURRENCES;
use collegium_db::db::enums::DayOfWeek;
use rrule::{RRule, RRuleSet, Unvalidated};

use super::zone::{end_of_day, local_to_utc};
use crate::error::{ServiceError, ServiceResult};

/// A validated recurrence rule bound to its first occurrence.
#[derive(Debug, Clone)]
pub struct RecurrenceSpec {
    rrule_set: RRuleSet,
    limit: u16,
}

impl RecurrenceSpec {
    /// ## Summary
    /// Parses an RRULE value (with or without a leading `RRULE:`) anchored at `anchor`.
    ///
    /// ## Errors
    /// Returns `ServiceError::RecurrenceRule` if the rule is empty, does not
    /// parse, or fails validation against the anchor.
    pub fn parse(rule: &str, anchor: DateTime<Utc>, zone: Tz) -> ServiceResult<Self> {
        let text = rule.trim();
        let text = text.strip_prefix("RRULE:").unwrap_or(text);
        if text.is_empty() {
            return Err(ServiceError::RecurrenceRule(
                "empty recurrence rule".to_string(),
            ));
        }

        let mut rrule = text
            .parse::<RRule<Unvalidated>>()
            .map_err(|err| ServiceError::RecurrenceRule(err.to_string()))?;

        // A zoned DTSTART only validates against a UTC UNTIL
        let floating_until = rrule
            .get_until()
            .filter(|until| until.timezone().is_local())
            .map(|until| until.naive_local());
        if let Some(wall_clock) = floating_until {
            let until = local_to_utc(zone, wall_clock);
            rrule = rrule.until(until.with_timezone(&rrule::Tz::UTC));
        }

        let dt_start = anchor.with_timezone(&rrule::Tz::Tz(zone));
        let rrule_set = rrule
            .build(dt_start)
            .map_err(|err| ServiceError::RecurrenceRule(err.to_string()))?;

        tracing::trace!(rrule = %text, anchor = %anchor, zone = %zone, "Parsed recurrence rule");

        Ok(Self {
            rrule_set,
            limit: DEFAULT_MAX_OCCURRENCES,
        })
    }

    /// Caps the number of occurrences a single expansion returns.
    #[must_use]
    pub fn with_limit(mut self, limit: u16) -> Self {
        self.limit = limit;
        self
    }

    /// ## Summary
    /// Returns every occurrence start in `[start, end]`, bounds included, in order.
    #[must_use]
    pub fn occurrences_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        let result = self
            .rrule_set
            .clone()
            .after((start - TimeDelta::seconds(1)).with_timezone(&rrule::Tz::UTC))
            .before((end + TimeDelta::seconds(1)).with_timezone(&rrule::Tz::UTC))
            .all(self.limit);

        if result.limited {
            tracing::warn!(
                limit = self.limit,
                "Recurrence expansion stopped at the occurrence limit"
            );
        }

        result
            .dates
            .into_iter()
            .map(|occurrence| occurrence.with_timezone(&Utc))
            .filter(|occurrence| start <= *occurrence && *occurrence <= end)
            .collect()
    }
}

/// ## Summary
/// Builds the weekly rule of a timetable slot.
///
/// `UNTIL` is the instant of the last second of `last_day` in the campus zone.
#[must_use]
pub fn weekly_rule(day: DayOfWeek, last_day: NaiveDate, zone: Tz) -> String {
    format!(
        "FREQ=WEEKLY;BYDAY={};UNTIL={}",
        day.byday_code(),
        end_of_day(zone, last_day).format("%Y%m%dT%H%M%SZ")
    )
}
