pub mod calendar_event;
pub mod member;
pub mod semester;
pub mod timetable;
