use chrono::{DateTime, Utc};
use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::{Deserialize, Serialize};
use tracing::error;

use collegium_core::constants::EVENTS_ROUTE_COMPONENT;
use collegium_core::types::DateWindow;
use collegium_service::calendar::{AcademicEvent, CalendarOptions, CalendarService};

use crate::config::get_config_from_depot;
use crate::error::AppResult;
use crate::store_handler::get_store_from_depot;

/// ## Summary
/// Query string of the events endpoint.
#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub user_id: Option<i32>,
}

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// ## Summary
/// GET /api/calendar/events - Lists the concrete events of a window
///
/// ## Errors
/// Returns HTTP 400 if `start` or `end` is missing or malformed, or `start` is after `end`
/// Returns HTTP 500 if loading the events fails
#[handler]
async fn list_events(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let query: EventsQuery = match req.parse_queries() {
        Ok(query) => query,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected calendar query");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse {
                error: "Query parameters `start` and `end` must be RFC 3339 timestamps"
                    .to_string(),
            }));
            return;
        }
    };

    let window = match DateWindow::new(query.start, query.end) {
        Ok(window) => window,
        Err(e) => {
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse {
                error: e.to_string(),
            }));
            return;
        }
    };

    match load_events(depot, &window, query.user_id).await {
        Ok(events) => {
            tracing::debug!(count = events.len(), "Returning calendar events");
            res.render(Json(events));
        }
        Err(e) => {
            error!(error = %e, "Failed to load calendar events");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Failed to load calendar events".to_string(),
            }));
        }
    }
}

async fn load_events(
    depot: &Depot,
    window: &DateWindow,
    user_id: Option<i32>,
) -> AppResult<Vec<AcademicEvent>> {
    let settings = get_config_from_depot(depot)?;
    let store = get_store_from_depot(depot)?;
    let options = CalendarOptions::from_config(&settings.calendar)?;

    Ok(CalendarService::new(store, options)
        .events_for_range(window, user_id)
        .await?)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(EVENTS_ROUTE_COMPONENT).get(list_events)
}
