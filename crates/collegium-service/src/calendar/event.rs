//! Event sources and the concrete event handed to calendar views.

use std::fmt;

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use chrono_tz::Tz;
use collegium_core::types::EventType;
use collegium_db::model::calendar_event::CalendarEvent;
use collegium_db::model::semester::Semester;
use collegium_db::model::timetable::TimetableSlot;
use serde::{Serialize, Serializer};

use super::recurrence::weekly_rule;
use super::zone::{at_local, end_of_day};

/// Table an event was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventOrigin {
    Calendar,
    Timetable,
    Semester,
}

impl EventOrigin {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::Timetable => "timetable",
            Self::Semester => "semester",
        }
    }

    const fn tag(self) -> i64 {
        match self {
            Self::Calendar => 0,
            Self::Timetable => 1,
            Self::Semester => 2,
        }
    }
}

const SOURCE_BITS: u32 = 27;
const ORIGIN_BITS: u32 = 2;
const TIMESTAMP_BITS: u32 = 33;
const OCCURRENCE_FLAG: i64 = 1 << (SOURCE_BITS + ORIGIN_BITS + TIMESTAMP_BITS);

/// ## Summary
/// Identifier of a returned event.
///
/// Row ids of different tables collide, so the origin is part of the id.
/// Materialized occurrences also carry their start instant, which keeps
/// them distinct from their parent and from each other.
///
/// On the wire the id is a single integer, see [`EventId::as_i64`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId {
    pub origin: EventOrigin,
    pub source_id: i32,
    pub occurrence: Option<DateTime<Utc>>,
}

impl EventId {
    #[must_use]
    pub const fn new(origin: EventOrigin, source_id: i32) -> Self {
        Self {
            origin,
            source_id,
            occurrence: None,
        }
    }

    /// Returns the id of the occurrence of this event starting at `at`.
    #[must_use]
    pub const fn with_occurrence(self, at: DateTime<Utc>) -> Self {
        Self {
            occurrence: Some(at),
            ..self
        }
    }

    /// ## Summary
    /// Packs the id into one non-negative integer.
    ///
    /// Bits 0-26 hold the source row id and bits 27-28 the origin. An
    /// occurrence adds its start as Unix seconds in bits 29-61 and sets bit
    /// 62. Distinct for row ids below 2^27 and starts between 1970 and 2242.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        let source = i64::from(self.source_id) & ((1 << SOURCE_BITS) - 1);
        let parent = (self.origin.tag() << SOURCE_BITS) | source;
        match self.occurrence {
            None => parent,
            Some(at) => {
                let seconds = at.timestamp() & ((1 << TIMESTAMP_BITS) - 1);
                OCCURRENCE_FLAG | (seconds << (SOURCE_BITS + ORIGIN_BITS)) | parent
            }
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.origin.as_str(), self.source_id)?;
        if let Some(at) = self.occurrence {
            write!(f, "-{}", at.timestamp())?;
        }
        Ok(())
    }
}

impl Serialize for EventId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_i64())
    }
}

/// A concrete event with fixed instants, as rendered by calendar views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicEvent {
    pub id: EventId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub is_recurring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_pattern: Option<String>,
}

impl AcademicEvent {
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// ## Summary
    /// Returns the rule to expand, if the event is flagged recurring and has a non-blank pattern.
    #[must_use]
    pub fn recurrence_rule(&self) -> Option<&str> {
        if !self.is_recurring {
            return None;
        }
        self.recurring_pattern
            .as_deref()
            .filter(|pattern| !pattern.trim().is_empty())
    }

    /// ## Summary
    /// Copies this event to a new start instant, keeping its duration.
    #[must_use]
    pub fn occurrence_at(&self, at: DateTime<Utc>) -> Self {
        Self {
            id: self.id.with_occurrence(at),
            start: at,
            end: at + self.duration(),
            ..self.clone()
        }
    }
}

/// First class meeting of a timetable slot, carrying the weekly rule that repeats it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableOccurrence {
    pub slot: TimetableSlot,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub rule: String,
}

impl TimetableOccurrence {
    /// ## Summary
    /// Anchors a slot on the first day of its semester in the campus zone.
    ///
    /// The weekly rule moves the meeting to the slot's weekday and stops at
    /// the last day of the semester.
    #[must_use]
    pub fn first_meeting(slot: TimetableSlot, semester: &Semester, zone: Tz) -> Self {
        let start = at_local(zone, semester.start_date, slot.entry.start_time);
        let end = at_local(zone, semester.start_date, slot.entry.end_time);
        let rule = weekly_rule(slot.entry.day_of_week, semester.end_date, zone);

        Self {
            slot,
            start,
            end,
            rule,
        }
    }
}

/// Whole-term band spanning the first to the last day of a semester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemesterSpan {
    pub semester_id: i32,
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl SemesterSpan {
    #[must_use]
    pub fn new(semester: &Semester, zone: Tz) -> Self {
        Self {
            semester_id: semester.id,
            name: semester.name.clone(),
            start: at_local(zone, semester.start_date, NaiveTime::MIN),
            end: end_of_day(zone, semester.end_date),
        }
    }
}

/// Every kind of record the calendar merges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSource {
    Calendar(CalendarEvent),
    Timetable(TimetableOccurrence),
    Semester(SemesterSpan),
}

impl EventSource {
    /// ## Summary
    /// Projects the source onto the common event shape.
    ///
    /// A span that ends before it starts is clamped to a zero-length event.
    #[must_use]
    pub fn into_event(self) -> AcademicEvent {
        let mut event = match self {
            Self::Calendar(row) => AcademicEvent {
                id: EventId::new(EventOrigin::Calendar, row.id),
                title: row.title,
                description: row.description,
                start: row.start_at,
                end: row.end_at,
                event_type: row.event_kind.into(),
                course_code: None,
                location: row.location,
                is_recurring: row.is_recurring,
                recurring_pattern: row.recurrence_rule,
            },
            Self::Timetable(occurrence) => AcademicEvent {
                id: EventId::new(EventOrigin::Timetable, occurrence.slot.entry.id),
                title: occurrence.slot.course_title,
                description: None,
                start: occurrence.start,
                end: occurrence.end,
                event_type: EventType::Course,
                course_code: Some(occurrence.slot.course_code),
                location: occurrence.slot.entry.room,
                is_recurring: true,
                recurring_pattern: Some(occurrence.rule),
            },
            Self::Semester(span) => AcademicEvent {
                id: EventId::new(EventOrigin::Semester, span.semester_id),
                title: format!("{} Semester", span.name),
                description: None,
                start: span.start,
                end: span.end,
                event_type: EventType::Semester,
                course_code: None,
                location: None,
                is_recurring: false,
                recurring_pattern: None,
            },
        };

        if event.end < event.start {
            tracing::warn!(id = %event.id, "Event ends before it starts, clamping to zero length");
            event.end = event.start;
        }
        event
    }
}
