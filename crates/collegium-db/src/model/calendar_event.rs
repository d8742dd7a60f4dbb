//! Models for administrative calendar events.

use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};

use crate::db::enums::CalendarEventKind;
use crate::db::schema;

/// Calendar entry maintained by administrative staff (exams, registration, holidays).
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::calendar_event)]
#[diesel(check_for_backend(Pg))]
pub struct CalendarEvent {
    pub id: i32,
    pub semester_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub event_kind: CalendarEventKind,
    pub location: Option<String>,
    pub is_recurring: bool,
    /// RRULE text, e.g. `FREQ=WEEKLY;BYDAY=FR`.
    pub recurrence_rule: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert struct for creating new calendar events
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::calendar_event)]
pub struct NewCalendarEvent<'a> {
    pub semester_id: i32,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub event_kind: CalendarEventKind,
    pub location: Option<&'a str>,
    pub is_recurring: bool,
    pub recurrence_rule: Option<&'a str>,
}
