use chrono_tz::Tz;
use collegium_core::types::DateWindow;
use collegium_db::model::semester::Semester;

use super::store::CalendarStore;
use super::zone::local_date;
use crate::error::ServiceResult;

/// ## Summary
/// Returns every semester whose span intersects the window.
///
/// The window's instants are read as campus calendar dates before they are
/// compared with semester dates.
///
/// ## Errors
/// Returns an error if the store lookup fails.
#[tracing::instrument(skip(store, window), fields(start = %window.start(), end = %window.end()))]
pub async fn resolve_semesters(
    store: &dyn CalendarStore,
    window: &DateWindow,
    zone: Tz,
) -> ServiceResult<Vec<Semester>> {
    let from = local_date(zone, window.start());
    let to = local_date(zone, window.end());

    store.semesters_between(from, to).await
}
