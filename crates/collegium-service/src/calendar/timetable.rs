use chrono_tz::Tz;
use collegium_db::model::semester::Semester;

use super::event::TimetableOccurrence;
use super::store::CalendarStore;
use super::viewer::Viewer;
use crate::error::ServiceResult;

/// ## Summary
/// Builds the first weekly meeting of every slot of `semester` the viewer can see.
///
/// ## Errors
/// Returns an error if the store lookup fails.
#[tracing::instrument(skip(store, semester), fields(semester_id = semester.id))]
pub async fn timetable_occurrences(
    store: &dyn CalendarStore,
    semester: &Semester,
    viewer: Viewer,
    zone: Tz,
) -> ServiceResult<Vec<TimetableOccurrence>> {
    let slots = store.timetable_slots(semester.id, viewer).await?;

    Ok(slots
        .into_iter()
        .map(|slot| TimetableOccurrence::first_meeting(slot, semester, zone))
        .collect())
}
