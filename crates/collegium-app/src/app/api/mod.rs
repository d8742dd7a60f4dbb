mod app_specific;
mod calendar;

use salvo::Router;

// Re-export route constants from core
pub use collegium_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, CALENDAR_ROUTE_COMPONENT, CALENDAR_ROUTE_PREFIX,
    EVENTS_ROUTE_COMPONENT, EVENTS_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the API router.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(calendar::routes())
}
