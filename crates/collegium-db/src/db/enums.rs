//! Database enum types with Diesel serialization.
//!
//! This module provides type-safe enum wrappers for database CHECK constraints.
//! Each enum implements `ToSql` and `FromSql` for automatic conversion between Rust and `PostgreSQL`.

use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use std::fmt;
use std::io::Write;

use collegium_core::types::EventType;

/// Kind of an administrative calendar event.
///
/// Maps to `calendar_event.event_kind` CHECK constraint.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum CalendarEventKind {
    Exam,
    Registration,
    Holiday,
    Other,
}

impl ToSql<Text, Pg> for CalendarEventKind {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for CalendarEventKind {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"exam" => Ok(Self::Exam),
            b"registration" => Ok(Self::Registration),
            b"holiday" => Ok(Self::Holiday),
            b"other" => Ok(Self::Other),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl CalendarEventKind {
    /// Returns the database string representation of this event kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exam => "exam",
            Self::Registration => "registration",
            Self::Holiday => "holiday",
            Self::Other => "other",
        }
    }
}

impl From<CalendarEventKind> for EventType {
    fn from(kind: CalendarEventKind) -> Self {
        match kind {
            CalendarEventKind::Exam => Self::Exam,
            CalendarEventKind::Registration => Self::Registration,
            CalendarEventKind::Holiday => Self::Holiday,
            CalendarEventKind::Other => Self::Other,
        }
    }
}

impl fmt::Display for CalendarEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day a timetable slot meets on.
///
/// Maps to `timetable_entry.day_of_week` CHECK constraint.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl ToSql<Text, Pg> for DayOfWeek {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for DayOfWeek {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"monday" => Ok(Self::Monday),
            b"tuesday" => Ok(Self::Tuesday),
            b"wednesday" => Ok(Self::Wednesday),
            b"thursday" => Ok(Self::Thursday),
            b"friday" => Ok(Self::Friday),
            b"saturday" => Ok(Self::Saturday),
            b"sunday" => Ok(Self::Sunday),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl DayOfWeek {
    /// Returns the database string representation of this day.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// Returns the two-letter RFC 5545 `BYDAY` code.
    #[must_use]
    pub const fn byday_code(self) -> &'static str {
        match self {
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
            Self::Sunday => "SU",
        }
    }
}

impl From<DayOfWeek> for chrono::Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Monday => Self::Mon,
            DayOfWeek::Tuesday => Self::Tue,
            DayOfWeek::Wednesday => Self::Wed,
            DayOfWeek::Thursday => Self::Thu,
            DayOfWeek::Friday => Self::Fri,
            DayOfWeek::Saturday => Self::Sat,
            DayOfWeek::Sunday => Self::Sun,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
