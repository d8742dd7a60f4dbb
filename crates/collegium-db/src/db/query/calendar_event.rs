//! Query functions for administrative calendar events.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::calendar_event;
use crate::model::calendar_event::{CalendarEvent, NewCalendarEvent};

/// ## Summary
/// Returns a query to select all calendar events.
#[must_use]
pub fn all() -> calendar_event::BoxedQuery<'static, diesel::pg::Pg> {
    calendar_event::table.into_boxed()
}

/// ## Summary
/// Returns a query to find the calendar events of any of the given semesters.
#[must_use]
pub fn by_semesters(semester_ids: &[i32]) -> calendar_event::BoxedQuery<'static, diesel::pg::Pg> {
    all()
        .filter(calendar_event::semester_id.eq_any(semester_ids.to_vec()))
        .order((calendar_event::start_at.asc(), calendar_event::id.asc()))
}

/// ## Summary
/// Lists the calendar events of the given semesters in one round trip.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_for_semesters(
    conn: &mut DbConnection<'_>,
    semester_ids: &[i32],
) -> QueryResult<Vec<CalendarEvent>> {
    if semester_ids.is_empty() {
        return Ok(Vec::new());
    }

    by_semesters(semester_ids)
        .select(CalendarEvent::as_select())
        .load::<CalendarEvent>(conn)
        .await
}

/// ## Summary
/// Inserts a new calendar event and returns the inserted record.
///
/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create_calendar_event(
    conn: &mut DbConnection<'_>,
    new_event: &NewCalendarEvent<'_>,
) -> QueryResult<CalendarEvent> {
    diesel::insert_into(calendar_event::table)
        .values(new_event)
        .returning(CalendarEvent::as_returning())
        .get_result(conn)
        .await
}
