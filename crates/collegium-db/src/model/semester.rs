use chrono::NaiveDate;
use diesel::{pg::Pg, prelude::*};

use crate::db::schema;

/// Academic term spanning `start_date..=end_date`.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::semester)]
#[diesel(check_for_backend(Pg))]
pub struct Semester {
    pub id: i32,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Insert struct for creating new semesters
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::semester)]
pub struct NewSemester<'a> {
    pub name: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
