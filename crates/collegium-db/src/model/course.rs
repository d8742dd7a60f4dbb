use diesel::{pg::Pg, prelude::*};

use crate::db::schema;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::course)]
#[diesel(check_for_backend(Pg))]
pub struct Course {
    pub id: i32,
    pub code: String,
    pub title: String,
    /// Staff member assigned to teach the course.
    pub lecturer_id: Option<i32>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::course)]
pub struct NewCourse<'a> {
    pub code: &'a str,
    pub title: &'a str,
    pub lecturer_id: Option<i32>,
}
