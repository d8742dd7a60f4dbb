//! Models for weekly timetable slots.

use chrono::NaiveTime;
use diesel::{pg::Pg, prelude::*};

use crate::db::enums::DayOfWeek;
use crate::db::schema;

/// Weekly class meeting slot for a course in a semester.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::timetable_entry)]
#[diesel(check_for_backend(Pg))]
pub struct TimetableEntry {
    pub id: i32,
    pub course_id: i32,
    pub semester_id: i32,
    pub lecturer_id: Option<i32>,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::timetable_entry)]
pub struct NewTimetableEntry<'a> {
    pub course_id: i32,
    pub semester_id: i32,
    pub lecturer_id: Option<i32>,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room: Option<&'a str>,
}

/// Timetable entry joined with the course it schedules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableSlot {
    pub entry: TimetableEntry,
    pub course_code: String,
    pub course_title: String,
}

impl From<(TimetableEntry, String, String)> for TimetableSlot {
    fn from((entry, course_code, course_title): (TimetableEntry, String, String)) -> Self {
        Self {
            entry,
            course_code,
            course_title,
        }
    }
}
