//! Aggregation scenarios over the in-memory store.

use std::collections::HashSet;

use chrono::TimeDelta;
use collegium_core::types::{DateWindow, EventType};
use collegium_service::calendar::{AcademicEvent, EventId, EventOrigin};
use collegium_test::component::config::UnresolvedViewerPolicy;
use collegium_test::component::db::enums::{CalendarEventKind, DayOfWeek};

use super::helpers::*;

const STUDENT_USER: i32 = 100;
const LECTURER_USER: i32 = 200;
const UNKNOWN_USER: i32 = 999;

/// Spring semester with a midterm on Wednesday 2026-03-04 and a Monday class.
fn campus() -> MemoryStore {
    MemoryStore::with_semesters()
        .calendar_event(
            SPRING,
            "Midterm exam",
            at(3, 4, 9, 0),
            at(3, 4, 12, 0),
            CalendarEventKind::Exam,
            None,
        )
        .class(1, "CS101", Some(20), SPRING, DayOfWeek::Monday, time(9, 0))
}

/// Two classes with different lecturers and one student enrolled in the first.
fn two_courses() -> MemoryStore {
    MemoryStore::with_semesters()
        .class(1, "CS101", Some(20), SPRING, DayOfWeek::Monday, time(9, 0))
        .class(2, "MA201", Some(21), SPRING, DayOfWeek::Tuesday, time(11, 0))
        .student(STUDENT_USER, 10, &[(1, SPRING)])
        .lecturer(LECTURER_USER, 21)
}

fn course_codes(events: &[AcademicEvent]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|event| event.course_code.as_deref())
        .collect()
}

/// Checks the properties every aggregation result has.
fn assert_well_formed(events: &[AcademicEvent], window: &DateWindow) {
    for event in events {
        assert!(event.start <= event.end, "{} ends before it starts", event.id);
        assert!(
            window.overlaps(event.start, event.end),
            "{} lies outside the window",
            event.id
        );
    }
    for pair in events.windows(2) {
        assert!(
            (pair[0].start, pair[0].end, pair[0].id) <= (pair[1].start, pair[1].end, pair[1].id),
            "{} and {} are out of order",
            pair[0].id,
            pair[1].id
        );
    }
    let ids: HashSet<EventId> = events.iter().map(|event| event.id).collect();
    assert_eq!(ids.len(), events.len(), "ids are not unique");
    let wire_ids: HashSet<i64> = events.iter().map(|event| event.id.as_i64()).collect();
    assert_eq!(wire_ids.len(), events.len(), "integer ids are not unique");
}

// ============================================================================
// One week inside the semester
// ============================================================================

#[test_log::test(tokio::test)]
async fn week_with_monday_has_exam_semester_and_one_class() {
    let window = window(at(3, 2, 0, 0), at(3, 8, 23, 59));

    let events = events(campus(), &window, None).await;

    assert_well_formed(&events, &window);
    let types: Vec<EventType> = events.iter().map(|event| event.event_type).collect();
    assert_eq!(
        types,
        vec![EventType::Semester, EventType::Course, EventType::Exam]
    );

    assert_eq!(titles_of(&events, "semester"), vec!["Spring 2026 Semester"]);
    assert_eq!(titles_of(&events, "exam"), vec!["Midterm exam"]);

    let class = &events[1];
    assert_eq!(class.start, at(3, 2, 9, 0));
    assert_eq!(class.end, at(3, 2, 10, 30));
    assert_eq!(class.course_code.as_deref(), Some("CS101"));
    assert_eq!(class.id.origin, EventOrigin::Timetable);
    assert!(class.id.occurrence.is_some());
}

#[test_log::test(tokio::test)]
async fn week_without_monday_has_no_class() {
    // Tuesday to Saturday
    let window = window(at(3, 3, 0, 0), at(3, 7, 23, 59));

    let events = events(campus(), &window, None).await;

    assert_well_formed(&events, &window);
    assert!(course_codes(&events).is_empty());
    assert_eq!(titles_of(&events, "exam"), vec!["Midterm exam"]);
    assert_eq!(titles_of(&events, "semester").len(), 1);
    assert_eq!(events.len(), 2);
}

#[test_log::test(tokio::test)]
async fn single_events_outside_window_are_excluded() {
    let store = campus().calendar_event(
        SPRING,
        "Registration closes",
        at(2, 20, 17, 0),
        at(2, 20, 18, 0),
        CalendarEventKind::Registration,
        None,
    );
    let window = window(at(3, 2, 0, 0), at(3, 8, 23, 59));

    let events = events(store, &window, None).await;

    assert!(titles_of(&events, "registration").is_empty());
}

#[test_log::test(tokio::test)]
async fn single_event_starting_before_window_is_excluded() {
    // Starts Sunday evening and runs into the window
    let store = campus().calendar_event(
        SPRING,
        "Open day",
        at(3, 1, 20, 0),
        at(3, 2, 10, 0),
        CalendarEventKind::Other,
        None,
    );
    let window = window(at(3, 2, 0, 0), at(3, 8, 23, 59));

    let events = events(store, &window, None).await;

    assert_well_formed(&events, &window);
    assert!(titles_of(&events, "other").is_empty());
    assert_eq!(titles_of(&events, "exam"), vec!["Midterm exam"]);
}

// ============================================================================
// Recurrence
// ============================================================================

#[test_log::test(tokio::test)]
async fn weekly_calendar_event_expands_inside_window() {
    // First meeting Friday 2026-01-09, well before the window
    let store = MemoryStore::with_semesters().calendar_event(
        SPRING,
        "Department meeting",
        at(1, 9, 14, 0),
        at(1, 9, 15, 0),
        CalendarEventKind::Other,
        Some("FREQ=WEEKLY;BYDAY=FR"),
    );
    let window = window(at(3, 2, 0, 0), at(3, 29, 23, 59));

    let events = events(store, &window, None).await;

    assert_well_formed(&events, &window);
    let meetings: Vec<&AcademicEvent> = events
        .iter()
        .filter(|event| event.event_type == EventType::Other)
        .collect();
    let starts: Vec<_> = meetings.iter().map(|event| event.start).collect();
    assert_eq!(
        starts,
        vec![
            at(3, 6, 14, 0),
            at(3, 13, 14, 0),
            at(3, 20, 14, 0),
            at(3, 27, 14, 0)
        ]
    );
    let parent = EventId::new(EventOrigin::Calendar, 1);
    for meeting in meetings {
        assert_eq!(meeting.end - meeting.start, TimeDelta::hours(1));
        assert_ne!(meeting.id, parent);
        assert_eq!(meeting.id.source_id, 1);
    }
}

#[test_log::test(tokio::test)]
async fn unusable_rule_does_not_hide_other_events() {
    let store = campus().calendar_event(
        SPRING,
        "Reading group",
        at(3, 3, 10, 0),
        at(3, 3, 11, 0),
        CalendarEventKind::Other,
        Some("FREQ=FORTNIGHTLY"),
    );
    let window = window(at(3, 2, 0, 0), at(3, 8, 23, 59));

    let events = events(store, &window, None).await;

    assert_well_formed(&events, &window);
    assert_eq!(titles_of(&events, "other"), vec!["Reading group"]);
    assert_eq!(titles_of(&events, "exam"), vec!["Midterm exam"]);
    assert_eq!(course_codes(&events), vec!["CS101"]);
}

#[test_log::test(tokio::test)]
async fn class_times_follow_campus_wall_clock_across_dst() {
    let store = MemoryStore::with_semesters().class(
        1,
        "CS101",
        None,
        SPRING,
        DayOfWeek::Monday,
        time(9, 0),
    );
    let window = window(at(3, 1, 0, 0), at(3, 14, 23, 0));

    let events = service(store, chrono_tz::America::New_York, UnresolvedViewerPolicy::Unscoped)
        .events_for_range(&window, None)
        .await
        .expect("aggregation should succeed");

    let classes: Vec<_> = events
        .iter()
        .filter(|event| event.event_type == EventType::Course)
        .map(|event| event.start)
        .collect();
    // 09:00 EST, then 09:00 EDT after 2026-03-08
    assert_eq!(classes, vec![at(3, 2, 14, 0), at(3, 9, 13, 0)]);
}

// ============================================================================
// Viewer scoping
// ============================================================================

#[test_log::test(tokio::test)]
async fn student_sees_only_enrolled_courses() {
    let window = window(at(3, 2, 0, 0), at(3, 8, 23, 59));

    let events = events(two_courses(), &window, Some(STUDENT_USER)).await;

    assert_well_formed(&events, &window);
    assert_eq!(course_codes(&events), vec!["CS101"]);
}

#[test_log::test(tokio::test)]
async fn lecturer_sees_only_assigned_courses() {
    let window = window(at(3, 2, 0, 0), at(3, 8, 23, 59));

    let events = events(two_courses(), &window, Some(LECTURER_USER)).await;

    assert_eq!(course_codes(&events), vec!["MA201"]);
    let class = events
        .iter()
        .find(|event| event.event_type == EventType::Course)
        .expect("one class");
    assert_eq!(class.start, at(3, 3, 11, 0));
}

#[test_log::test(tokio::test)]
async fn no_user_sees_every_course() {
    let window = window(at(3, 2, 0, 0), at(3, 8, 23, 59));

    let events = events(two_courses(), &window, None).await;

    assert_eq!(course_codes(&events), vec!["CS101", "MA201"]);
}

#[test_log::test(tokio::test)]
async fn unknown_user_follows_unscoped_policy() {
    let window = window(at(3, 2, 0, 0), at(3, 8, 23, 59));

    let events = events(two_courses(), &window, Some(UNKNOWN_USER)).await;

    assert_eq!(course_codes(&events), vec!["CS101", "MA201"]);
}

#[test_log::test(tokio::test)]
async fn unknown_user_follows_empty_policy() {
    let window = window(at(3, 2, 0, 0), at(3, 8, 23, 59));

    let events = service(two_courses(), chrono_tz::UTC, UnresolvedViewerPolicy::Empty)
        .events_for_range(&window, Some(UNKNOWN_USER))
        .await
        .expect("aggregation should succeed");

    assert!(course_codes(&events).is_empty());
    assert_eq!(titles_of(&events, "semester"), vec!["Spring 2026 Semester"]);
}

// ============================================================================
// Semester boundaries
// ============================================================================

#[test_log::test(tokio::test)]
async fn window_across_semester_end() {
    let store = campus()
        .calendar_event(
            SPRING,
            "Final exam",
            at(5, 27, 9, 0),
            at(5, 27, 12, 0),
            CalendarEventKind::Exam,
            None,
        )
        .calendar_event(
            SUMMER,
            "Summer registration",
            at(6, 3, 8, 0),
            at(6, 3, 17, 0),
            CalendarEventKind::Registration,
            None,
        );
    let window = window(at(5, 25, 0, 0), at(6, 7, 23, 59));

    let events = events(store, &window, None).await;

    assert_well_formed(&events, &window);
    assert_eq!(titles_of(&events, "semester"), vec!["Spring 2026 Semester"]);
    assert_eq!(titles_of(&events, "exam"), vec!["Final exam"]);
    assert!(titles_of(&events, "registration").is_empty());

    // Monday 2026-06-01 is past the last day of the semester
    let classes: Vec<_> = events
        .iter()
        .filter(|event| event.event_type == EventType::Course)
        .map(|event| event.start)
        .collect();
    assert_eq!(classes, vec![at(5, 25, 9, 0)]);

    let semester = &events[0];
    assert_eq!(semester.start, at(1, 5, 0, 0));
    assert_eq!(semester.end, at(5, 29, 23, 59) + TimeDelta::seconds(59));
}

#[test_log::test(tokio::test)]
async fn window_spanning_two_semesters_merges_both_timetables() {
    let store = campus().class(3, "PH110", None, SUMMER, DayOfWeek::Wednesday, time(14, 0));
    let window = window(at(5, 25, 0, 0), at(7, 10, 23, 59));

    let events = events(store, &window, None).await;

    assert_well_formed(&events, &window);
    assert_eq!(
        titles_of(&events, "semester"),
        vec!["Spring 2026 Semester", "Summer 2026 Semester"]
    );
    let summer_classes: Vec<_> = events
        .iter()
        .filter(|event| event.course_code.as_deref() == Some("PH110"))
        .map(|event| event.start)
        .collect();
    assert_eq!(summer_classes, vec![at(7, 1, 14, 0), at(7, 8, 14, 0)]);
    assert_eq!(course_codes(&events).iter().filter(|code| **code == "CS101").count(), 1);
}

#[test_log::test(tokio::test)]
async fn no_semester_means_no_events() {
    let between_terms = window(at(6, 10, 0, 0), at(6, 20, 0, 0));
    assert!(events(campus(), &between_terms, None).await.is_empty());

    let next_year = DateWindow::new(
        at(1, 1, 0, 0) + TimeDelta::days(400),
        at(1, 1, 0, 0) + TimeDelta::days(410),
    )
    .expect("valid window");
    assert!(events(campus(), &next_year, Some(STUDENT_USER)).await.is_empty());
}

// ============================================================================
// Failures
// ============================================================================

#[test_log::test(tokio::test)]
async fn store_failure_is_propagated() {
    let store = MemoryStore {
        offline: true,
        ..campus()
    };
    let window = window(at(3, 2, 0, 0), at(3, 8, 23, 59));

    let result = service(store, chrono_tz::UTC, UnresolvedViewerPolicy::Unscoped)
        .events_for_range(&window, None)
        .await;

    assert!(result.is_err());
}
