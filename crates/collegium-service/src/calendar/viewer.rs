//! Whose timetable a calendar request shows.

use collegium_core::config::UnresolvedViewerPolicy;

use super::store::CalendarStore;
use crate::error::ServiceResult;

/// Role a user id resolved to, carrying the matching record id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Viewer {
    /// Student record id; sees courses they are enrolled in.
    Student(i32),
    /// Staff record id; sees courses they teach.
    Lecturer(i32),
    /// Sees every timetable slot.
    Unscoped,
}

/// ## Summary
/// Resolves a user id once per request.
///
/// `None` means no timetable slots should be shown at all.
///
/// ## Errors
/// Returns an error if the store lookup fails.
#[tracing::instrument(skip(store))]
pub async fn resolve_viewer(
    store: &dyn CalendarStore,
    user_id: Option<i32>,
    policy: UnresolvedViewerPolicy,
) -> ServiceResult<Option<Viewer>> {
    let Some(user_id) = user_id else {
        return Ok(Some(Viewer::Unscoped));
    };

    if let Some(viewer) = store.find_viewer(user_id).await? {
        tracing::debug!(?viewer, "Resolved calendar viewer");
        return Ok(Some(viewer));
    }

    tracing::warn!(
        user_id,
        ?policy,
        "User is neither a student nor staff, applying unresolved viewer policy"
    );
    Ok(match policy {
        UnresolvedViewerPolicy::Unscoped => Some(Viewer::Unscoped),
        UnresolvedViewerPolicy::Empty => None,
    })
}
