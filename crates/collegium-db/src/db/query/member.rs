//! Lookups that turn a user account into a student or staff record.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::{course, enrollment, staff, student};
use crate::model::course::{Course, NewCourse};
use crate::model::enrollment::{Enrollment, NewEnrollment};
use crate::model::member::{NewStaff, NewStudent, Staff, Student};

/// ## Summary
/// Finds the student record owned by `user_id`.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn student_id_for_user(
    conn: &mut DbConnection<'_>,
    user_id: i32,
) -> QueryResult<Option<i32>> {
    student::table
        .filter(student::user_id.eq(user_id))
        .select(student::id)
        .first::<i32>(conn)
        .await
        .optional()
}

/// ## Summary
/// Finds the staff record owned by `user_id`.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn staff_id_for_user(
    conn: &mut DbConnection<'_>,
    user_id: i32,
) -> QueryResult<Option<i32>> {
    staff::table
        .filter(staff::user_id.eq(user_id))
        .select(staff::id)
        .first::<i32>(conn)
        .await
        .optional()
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create_student(
    conn: &mut DbConnection<'_>,
    new_student: &NewStudent<'_>,
) -> QueryResult<Student> {
    diesel::insert_into(student::table)
        .values(new_student)
        .returning(Student::as_returning())
        .get_result(conn)
        .await
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create_staff(
    conn: &mut DbConnection<'_>,
    new_staff: &NewStaff<'_>,
) -> QueryResult<Staff> {
    diesel::insert_into(staff::table)
        .values(new_staff)
        .returning(Staff::as_returning())
        .get_result(conn)
        .await
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create_course(
    conn: &mut DbConnection<'_>,
    new_course: &NewCourse<'_>,
) -> QueryResult<Course> {
    diesel::insert_into(course::table)
        .values(new_course)
        .returning(Course::as_returning())
        .get_result(conn)
        .await
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create_enrollment(
    conn: &mut DbConnection<'_>,
    new_enrollment: &NewEnrollment,
) -> QueryResult<Enrollment> {
    diesel::insert_into(enrollment::table)
        .values(new_enrollment)
        .returning(Enrollment::as_returning())
        .get_result(conn)
        .await
}
