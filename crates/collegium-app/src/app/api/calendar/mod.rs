use salvo::Router;

use collegium_core::constants::CALENDAR_ROUTE_COMPONENT;

mod events;

#[must_use]
pub fn routes() -> Router {
    Router::with_path(CALENDAR_ROUTE_COMPONENT).push(events::routes())
}
