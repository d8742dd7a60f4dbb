//! Entry point merging every event source for a calendar view.

use std::sync::Arc;

use chrono_tz::Tz;
use collegium_core::config::{CalendarConfig, UnresolvedViewerPolicy};
use collegium_core::constants::DEFAULT_MAX_OCCURRENCES;
use collegium_core::error::CoreResult;
use collegium_core::types::DateWindow;
use futures::future::try_join_all;

use super::event::{AcademicEvent, EventSource, SemesterSpan, TimetableOccurrence};
use super::expand::{ExpansionOptions, expand_occurrences};
use super::semester::resolve_semesters;
use super::store::CalendarStore;
use super::timetable::timetable_occurrences;
use super::viewer::resolve_viewer;
use crate::error::ServiceResult;

#[derive(Debug, Clone, Copy)]
pub struct CalendarOptions {
    pub zone: Tz,
    pub unresolved_viewer: UnresolvedViewerPolicy,
    pub max_occurrences: u16,
}

impl CalendarOptions {
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the configured time zone is unknown.
    pub fn from_config(config: &CalendarConfig) -> CoreResult<Self> {
        Ok(Self {
            zone: config.zone()?,
            unresolved_viewer: config.unresolved_viewer,
            max_occurrences: config.max_occurrences,
        })
    }

    const fn expansion(&self) -> ExpansionOptions {
        ExpansionOptions {
            zone: self.zone,
            max_occurrences: self.max_occurrences,
        }
    }
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            zone: chrono_tz::UTC,
            unresolved_viewer: UnresolvedViewerPolicy::default(),
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
        }
    }
}

/// Builds the list of concrete events a calendar view renders.
#[derive(Clone)]
pub struct CalendarService {
    store: Arc<dyn CalendarStore>,
    options: CalendarOptions,
}

impl CalendarService {
    #[must_use]
    pub fn new(store: Arc<dyn CalendarStore>, options: CalendarOptions) -> Self {
        Self { store, options }
    }

    /// ## Summary
    /// Returns every event overlapping the window, ordered by start, end and id.
    ///
    /// Semester bands, administrative calendar rows and the timetable of the
    /// user (every slot when no user is given) are merged. Recurring events are
    /// expanded into their occurrences inside the window.
    ///
    /// ## Errors
    /// Returns an error if any store lookup fails. Unusable recurrence rules
    /// are not errors; the affected event is kept as a single instance.
    #[tracing::instrument(
        skip(self, window),
        fields(start = %window.start(), end = %window.end())
    )]
    pub async fn events_for_range(
        &self,
        window: &DateWindow,
        user_id: Option<i32>,
    ) -> ServiceResult<Vec<AcademicEvent>> {
        let store = self.store.as_ref();
        let zone = self.options.zone;

        let semesters = resolve_semesters(store, window, zone).await?;
        if semesters.is_empty() {
            tracing::debug!("No semester intersects the window");
            return Ok(Vec::new());
        }

        let semester_ids: Vec<i32> = semesters.iter().map(|semester| semester.id).collect();
        let calendar_rows = store.calendar_events_for(&semester_ids).await?;

        let viewer = resolve_viewer(store, user_id, self.options.unresolved_viewer).await?;
        let timetable: Vec<TimetableOccurrence> = match viewer {
            Some(viewer) => try_join_all(
                semesters
                    .iter()
                    .map(|semester| timetable_occurrences(store, semester, viewer, zone)),
            )
            .await?
            .into_iter()
            .flatten()
            .collect(),
            None => Vec::new(),
        };

        let sources: Vec<AcademicEvent> = calendar_rows
            .into_iter()
            .map(EventSource::Calendar)
            .chain(timetable.into_iter().map(EventSource::Timetable))
            .map(EventSource::into_event)
            .collect();

        let mut events = expand_occurrences(sources, window, self.options.expansion());

        // Semester bands overlap the window without starting in it
        events.extend(
            semesters
                .iter()
                .map(|semester| EventSource::Semester(SemesterSpan::new(semester, zone)).into_event()),
        );

        events.retain(|event| window.overlaps(event.start, event.end));
        events.sort_by(|a, b| (a.start, a.end, a.id).cmp(&(b.start, b.end, b.id)));

        tracing::debug!(count = events.len(), "Calendar events aggregated");
        Ok(events)
    }
}
