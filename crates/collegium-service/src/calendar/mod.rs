//! Academic calendar aggregation.
//!
//! Merges administrative calendar events, weekly timetable slots and
//! semester spans into one list of concrete events for a window.

pub mod aggregate;
pub mod event;
pub mod expand;
pub mod recurrence;
pub mod semester;
pub mod store;
pub mod timetable;
pub mod viewer;
pub mod zone;

pub use aggregate::{CalendarOptions, CalendarService};
pub use event::{AcademicEvent, EventId, EventOrigin, EventSource};
pub use store::{CalendarStore, PgCalendarStore, StoreFuture};
pub use viewer::Viewer;
