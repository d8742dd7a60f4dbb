//! Shared fixtures for calendar integration tests.
//!
//! `MemoryStore` answers the same questions as the Postgres store from plain
//! vectors, so aggregation scenarios run without a database.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use salvo::http::StatusCode;
use salvo::test::{ResponseExt, TestClient};
use salvo::{Router, Service};

use collegium_core::error::CoreError;
use collegium_core::types::DateWindow;
use collegium_service::calendar::{
    AcademicEvent, CalendarOptions, CalendarService, CalendarStore, StoreFuture, Viewer,
};
use collegium_service::error::ServiceError;
use collegium_test::app::store_handler::CalendarStoreHandler;
use collegium_test::component::config::{
    ConfigHandler, Settings, UnresolvedViewerPolicy,
};
use collegium_test::component::db::enums::{CalendarEventKind, DayOfWeek};
use collegium_test::component::model::calendar_event::CalendarEvent;
use collegium_test::component::model::course::Course;
use collegium_test::component::model::enrollment::Enrollment;
use collegium_test::component::model::member::{Staff, Student};
use collegium_test::component::model::semester::Semester;
use collegium_test::component::model::timetable::{TimetableEntry, TimetableSlot};

pub use tracing;

/// Semester used by most scenarios: Monday 2026-01-05 to Friday 2026-05-29.
pub const SPRING: i32 = 1;
/// Semester after the spring break: 2026-07-01 to 2026-08-28.
pub const SUMMER: i32 = 2;
pub const CLASS_MINUTES: i64 = 90;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

pub fn at(month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, month, day, hour, minute, 0)
        .single()
        .expect("valid instant")
}

pub fn window(start: DateTime<Utc>, end: DateTime<Utc>) -> DateWindow {
    DateWindow::new(start, end).expect("start before end")
}

/// In-memory collaborator backing the calendar service.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub semesters: Vec<Semester>,
    pub events: Vec<CalendarEvent>,
    pub courses: Vec<Course>,
    pub entries: Vec<TimetableEntry>,
    pub enrollments: Vec<Enrollment>,
    pub students: Vec<Student>,
    pub staff: Vec<Staff>,
    /// Makes every lookup fail, as an unreachable database would.
    pub offline: bool,
}

impl MemoryStore {
    /// Spring and summer semesters with no events or classes.
    #[must_use]
    pub fn with_semesters() -> Self {
        Self {
            semesters: vec![
                Semester {
                    id: SPRING,
                    name: "Spring 2026".to_string(),
                    start_date: date(2026, 1, 5),
                    end_date: date(2026, 5, 29),
                },
                Semester {
                    id: SUMMER,
                    name: "Summer 2026".to_string(),
                    start_date: date(2026, 7, 1),
                    end_date: date(2026, 8, 28),
                },
            ],
            ..Self::default()
        }
    }

    /// Adds a calendar row. `rule` marks the row as recurring.
    #[must_use]
    pub fn calendar_event(
        mut self,
        semester_id: i32,
        title: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        kind: CalendarEventKind,
        rule: Option<&str>,
    ) -> Self {
        let id = i32::try_from(self.events.len()).expect("few events") + 1;
        self.events.push(CalendarEvent {
            id,
            semester_id,
            title: title.to_string(),
            description: None,
            start_at: start,
            end_at: end,
            event_kind: kind,
            location: None,
            is_recurring: rule.is_some(),
            recurrence_rule: rule.map(str::to_string),
            created_at: at(1, 1, 0, 0),
            updated_at: at(1, 1, 0, 0),
        });
        self
    }

    /// Adds a course and one weekly 90 minute slot for it in `semester_id`.
    #[must_use]
    pub fn class(
        mut self,
        course_id: i32,
        code: &str,
        lecturer_id: Option<i32>,
        semester_id: i32,
        day: DayOfWeek,
        start: NaiveTime,
    ) -> Self {
        if !self.courses.iter().any(|course| course.id == course_id) {
            self.courses.push(Course {
                id: course_id,
                code: code.to_string(),
                title: format!("{code} lecture"),
                lecturer_id,
            });
        }
        let id = i32::try_from(self.entries.len()).expect("few entries") + 1;
        self.entries.push(TimetableEntry {
            id,
            course_id,
            semester_id,
            lecturer_id,
            day_of_week: day,
            start_time: start,
            end_time: start + TimeDelta::minutes(CLASS_MINUTES),
            room: Some(format!("Room {id}")),
        });
        self
    }

    #[must_use]
    pub fn student(mut self, user_id: i32, student_id: i32, enrolled_in: &[(i32, i32)]) -> Self {
        self.students.push(Student {
            id: student_id,
            user_id,
            full_name: format!("Student {student_id}"),
        });
        for &(course_id, semester_id) in enrolled_in {
            let id = i32::try_from(self.enrollments.len()).expect("few enrollments") + 1;
            self.enrollments.push(Enrollment {
                id,
                student_id,
                course_id,
                semester_id,
            });
        }
        self
    }

    #[must_use]
    pub fn lecturer(mut self, user_id: i32, staff_id: i32) -> Self {
        self.staff.push(Staff {
            id: staff_id,
            user_id,
            full_name: format!("Lecturer {staff_id}"),
        });
        self
    }

    fn check_online(&self) -> Result<(), ServiceError> {
        if self.offline {
            return Err(CoreError::InvariantViolation("store offline").into());
        }
        Ok(())
    }

    fn slot(&self, entry: &TimetableEntry) -> Option<TimetableSlot> {
        let course = self.courses.iter().find(|course| course.id == entry.course_id)?;
        Some(TimetableSlot {
            entry: entry.clone(),
            course_code: course.code.clone(),
            course_title: course.title.clone(),
        })
    }

    fn visible(&self, entry: &TimetableEntry, viewer: Viewer) -> bool {
        match viewer {
            Viewer::Student(student_id) => self.enrollments.iter().any(|enrollment| {
                enrollment.student_id == student_id
                    && enrollment.course_id == entry.course_id
                    && enrollment.semester_id == entry.semester_id
            }),
            Viewer::Lecturer(staff_id) => self
                .courses
                .iter()
                .any(|course| course.id == entry.course_id && course.lecturer_id == Some(staff_id)),
            Viewer::Unscoped => true,
        }
    }
}

impl CalendarStore for MemoryStore {
    fn semesters_between(&self, from: NaiveDate, to: NaiveDate) -> StoreFuture<'_, Vec<Semester>> {
        Box::pin(async move {
            self.check_online()?;
            let mut semesters: Vec<Semester> = self
                .semesters
                .iter()
                .filter(|semester| {
                    (from <= semester.start_date && semester.start_date <= to)
                        || (from <= semester.end_date && semester.end_date <= to)
                        || (semester.start_date <= from && semester.end_date >= to)
                })
                .cloned()
                .collect();
            semesters.sort_by_key(|semester| (semester.start_date, semester.id));
            Ok(semesters)
        })
    }

    fn calendar_events_for<'a>(&'a self, semester_ids: &'a [i32]) -> StoreFuture<'a, Vec<CalendarEvent>> {
        Box::pin(async move {
            self.check_online()?;
            Ok(self
                .events
                .iter()
                .filter(|event| semester_ids.contains(&event.semester_id))
                .cloned()
                .collect())
        })
    }

    fn find_viewer(&self, user_id: i32) -> StoreFuture<'_, Option<Viewer>> {
        Box::pin(async move {
            self.check_online()?;
            if let Some(student) = self.students.iter().find(|student| student.user_id == user_id) {
                return Ok(Some(Viewer::Student(student.id)));
            }
            Ok(self
                .staff
                .iter()
                .find(|staff| staff.user_id == user_id)
                .map(|staff| Viewer::Lecturer(staff.id)))
        })
    }

    fn timetable_slots(&self, semester_id: i32, viewer: Viewer) -> StoreFuture<'_, Vec<TimetableSlot>> {
        Box::pin(async move {
            self.check_online()?;
            Ok(self
                .entries
                .iter()
                .filter(|entry| entry.semester_id == semester_id && self.visible(entry, viewer))
                .filter_map(|entry| self.slot(entry))
                .collect())
        })
    }
}

/// Calendar service over `store` in the given campus zone.
pub fn service(store: MemoryStore, zone: Tz, policy: UnresolvedViewerPolicy) -> CalendarService {
    let options = CalendarOptions {
        zone,
        unresolved_viewer: policy,
        ..CalendarOptions::default()
    };
    CalendarService::new(Arc::new(store), options)
}

/// Runs an aggregation in UTC with the default viewer policy.
pub async fn events(store: MemoryStore, window: &DateWindow, user_id: Option<i32>) -> Vec<AcademicEvent> {
    service(store, chrono_tz::UTC, UnresolvedViewerPolicy::Unscoped)
        .events_for_range(window, user_id)
        .await
        .expect("aggregation should succeed")
}

/// Titles of the events of one type, in result order.
pub fn titles_of(events: &[AcademicEvent], event_type: &str) -> Vec<String> {
    events
        .iter()
        .filter(|event| event.event_type.as_str() == event_type)
        .map(|event| event.title.clone())
        .collect()
}

pub fn test_settings() -> Settings {
    Settings::from_toml(
        r#"
[database]
url = "postgresql://localhost/collegium_test"
run_migrations = false

[calendar]
timezone = "UTC"
"#,
    )
    .expect("test settings should load")
}

/// Salvo service wired the way the binary wires it, over an in-memory store.
pub fn create_test_service(store: MemoryStore) -> Service {
    let store: Arc<dyn CalendarStore> = Arc::new(store);
    let router = Router::new()
        .hoop(ConfigHandler {
            settings: test_settings(),
        })
        .hoop(CalendarStoreHandler { store })
        .push(collegium_test::app::api::routes());
    Service::new(router)
}

/// Sends a GET request and returns the status and body text.
pub async fn get(service: &Service, path_and_query: &str) -> (StatusCode, String) {
    let url = format!("http://127.0.0.1:5800{path_and_query}");
    let mut response = TestClient::get(&url).send(service).await;
    let status = response
        .status_code
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.take_string().await.unwrap_or_default();
    (status, body)
}
