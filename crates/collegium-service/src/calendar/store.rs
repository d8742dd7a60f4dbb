//! Read access to the records the calendar merges.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::NaiveDate;
use collegium_db::db::DbProvider;
use collegium_db::db::query::{calendar_event, member, semester, timetable};
use collegium_db::model::calendar_event::CalendarEvent;
use collegium_db::model::semester::Semester;
use collegium_db::model::timetable::TimetableSlot;

use super::viewer::Viewer;
use crate::error::ServiceResult;

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = ServiceResult<T>> + Send + 'a>>;

/// Source of semesters, calendar rows and timetable slots.
pub trait CalendarStore: Send + Sync {
    /// Semesters whose span intersects `from..=to`, ordered by start date.
    fn semesters_between(&self, from: NaiveDate, to: NaiveDate) -> StoreFuture<'_, Vec<Semester>>;

    /// Administrative calendar rows of any of the given semesters.
    fn calendar_events_for<'a>(&'a self, semester_ids: &'a [i32]) -> StoreFuture<'a, Vec<CalendarEvent>>;

    /// Student or staff role of a user account. Student records win when both exist.
    fn find_viewer(&self, user_id: i32) -> StoreFuture<'_, Option<Viewer>>;

    /// Timetable slots of a semester visible to `viewer`.
    fn timetable_slots(&self, semester_id: i32, viewer: Viewer) -> StoreFuture<'_, Vec<TimetableSlot>>;
}

/// `CalendarStore` over the Postgres pool.
#[derive(Clone)]
pub struct PgCalendarStore {
    provider: Arc<dyn DbProvider>,
}

impl PgCalendarStore {
    #[must_use]
    pub fn new(provider: Arc<dyn DbProvider>) -> Self {
        Self { provider }
    }
}

impl CalendarStore for PgCalendarStore {
    #[tracing::instrument(skip(self))]
    fn semesters_between(&self, from: NaiveDate, to: NaiveDate) -> StoreFuture<'_, Vec<Semester>> {
        Box::pin(async move {
            let mut conn = self.provider.get_connection().await?;
            let semesters = semester::list_intersecting(&mut conn, from, to).await?;
            tracing::debug!(count = semesters.len(), "Loaded intersecting semesters");
            Ok(semesters)
        })
    }

    #[tracing::instrument(skip(self))]
    fn calendar_events_for<'a>(&'a self, semester_ids: &'a [i32]) -> StoreFuture<'a, Vec<CalendarEvent>> {
        Box::pin(async move {
            let mut conn = self.provider.get_connection().await?;
            let events = calendar_event::list_for_semesters(&mut conn, semester_ids).await?;
            tracing::debug!(count = events.len(), "Loaded calendar events");
            Ok(events)
        })
    }

    #[tracing::instrument(skip(self))]
    fn find_viewer(&self, user_id: i32) -> StoreFuture<'_, Option<Viewer>> {
        Box::pin(async move {
            let mut conn = self.provider.get_connection().await?;
            if let Some(student_id) = member::student_id_for_user(&mut conn, user_id).await? {
                return Ok(Some(Viewer::Student(student_id)));
            }
            let staff_id = member::staff_id_for_user(&mut conn, user_id).await?;
            Ok(staff_id.map(Viewer::Lecturer))
        })
    }

    #[tracing::instrument(skip(self))]
    fn timetable_slots(&self, semester_id: i32, viewer: Viewer) -> StoreFuture<'_, Vec<TimetableSlot>> {
        Box::pin(async move {
            let query = match viewer {
                Viewer::Student(student_id) => timetable::by_semester_for_student(semester_id, student_id),
                Viewer::Lecturer(staff_id) => timetable::by_semester_for_lecturer(semester_id, staff_id),
                Viewer::Unscoped => timetable::by_semester(semester_id),
            };
            let mut conn = self.provider.get_connection().await?;
            let slots = timetable::load_slots(&mut conn, query).await?;
            tracing::debug!(count = slots.len(), "Loaded timetable slots");
            Ok(slots)
        })
    }
}
