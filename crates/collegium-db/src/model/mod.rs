pub mod calendar_event;
pub mod course;
pub mod enrollment;
pub mod member;
pub mod semester;
pub mod timetable;
