//! Query functions for timetable slots.
//!
//! Every query joins the course so callers get the course code and title
//! alongside the slot.

use diesel::dsl::{InnerJoin, IntoBoxed};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::{course, enrollment, timetable_entry};
use crate::model::timetable::{NewTimetableEntry, TimetableEntry, TimetableSlot};

pub type BoxedSlotQuery<'a> = IntoBoxed<'a, InnerJoin<timetable_entry::table, course::table>, Pg>;

/// ## Summary
/// Returns a query for every slot of a semester.
#[must_use]
pub fn by_semester(semester_id: i32) -> BoxedSlotQuery<'static> {
    timetable_entry::table
        .inner_join(course::table)
        .into_boxed()
        .filter(timetable_entry::semester_id.eq(semester_id))
        .order((timetable_entry::start_time.asc(), timetable_entry::id.asc()))
}

/// ## Summary
/// Returns a query for the slots of courses a student is enrolled in for the semester.
#[must_use]
pub fn by_semester_for_student(semester_id: i32, student_id: i32) -> BoxedSlotQuery<'static> {
    by_semester(semester_id).filter(
        timetable_entry::course_id.eq_any(
            enrollment::table
                .filter(enrollment::student_id.eq(student_id))
                .filter(enrollment::semester_id.eq(semester_id))
                .select(enrollment::course_id),
        ),
    )
}

/// ## Summary
/// Returns a query for the slots of courses assigned to a lecturer.
#[must_use]
pub fn by_semester_for_lecturer(semester_id: i32, staff_id: i32) -> BoxedSlotQuery<'static> {
    by_semester(semester_id).filter(course::lecturer_id.eq(staff_id))
}

/// ## Summary
/// Loads the slots selected by `query`.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn load_slots(
    conn: &mut DbConnection<'_>,
    query: BoxedSlotQuery<'static>,
) -> QueryResult<Vec<TimetableSlot>> {
    let rows = query
        .select((TimetableEntry::as_select(), course::code, course::title))
        .load::<(TimetableEntry, String, String)>(conn)
        .await?;
    Ok(rows.into_iter().map(TimetableSlot::from).collect())
}

/// ## Summary
/// Inserts a new timetable entry and returns the inserted record.
///
/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create_timetable_entry(
    conn: &mut DbConnection<'_>,
    new_entry: &NewTimetableEntry<'_>,
) -> QueryResult<TimetableEntry> {
    diesel::insert_into(timetable_entry::table)
        .values(new_entry)
        .returning(TimetableEntry::as_returning())
        .get_result(conn)
        .await
}
