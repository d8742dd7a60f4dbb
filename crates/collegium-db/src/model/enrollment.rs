use diesel::{pg::Pg, prelude::*};

use crate::db::schema;

/// Student taking a course in a given semester.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::enrollment)]
#[diesel(check_for_backend(Pg))]
pub struct Enrollment {
    pub id: i32,
    pub student_id: i32,
    pub course_id: i32,
    pub semester_id: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::enrollment)]
pub struct NewEnrollment {
    pub student_id: i32,
    pub course_id: i32,
    pub semester_id: i32,
}
