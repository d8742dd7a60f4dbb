//! Query functions for semesters.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::semester;
use crate::model::semester::{NewSemester, Semester};

/// ## Summary
/// Returns a query to select all semesters.
#[must_use]
pub fn all() -> semester::BoxedQuery<'static, diesel::pg::Pg> {
    semester::table.into_boxed()
}

/// ## Summary
/// Returns a query to find semesters whose span intersects `from..=to`.
///
/// A semester matches when it starts inside the range, ends inside the range,
/// or contains the whole range. Results are ordered by start date.
#[must_use]
pub fn intersecting(from: NaiveDate, to: NaiveDate) -> semester::BoxedQuery<'static, diesel::pg::Pg> {
    all()
        .filter(
            semester::start_date
                .between(from, to)
                .or(semester::end_date.between(from, to))
                .or(semester::start_date
                    .le(from)
                    .and(semester::end_date.ge(to))),
        )
        .order((semester::start_date.asc(), semester::id.asc()))
}

/// ## Summary
/// Lists semesters whose span intersects `from..=to`.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_intersecting(
    conn: &mut DbConnection<'_>,
    from: NaiveDate,
    to: NaiveDate,
) -> QueryResult<Vec<Semester>> {
    intersecting(from, to)
        .select(Semester::as_select())
        .load::<Semester>(conn)
        .await
}

/// ## Summary
/// Inserts a new semester and returns the inserted record.
///
/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create_semester(
    conn: &mut DbConnection<'_>,
    new_semester: &NewSemester<'_>,
) -> QueryResult<Semester> {
    diesel::insert_into(semester::table)
        .values(new_semester)
        .returning(Semester::as_returning())
        .get_result(conn)
        .await
}
