//! Materializes recurring events into concrete occurrences inside a window.

use chrono_tz::Tz;
use collegium_core::constants::DEFAULT_MAX_OCCURRENCES;
use collegium_core::types::DateWindow;

use super::event::AcademicEvent;
use super::recurrence::RecurrenceSpec;

#[derive(Debug, Clone, Copy)]
pub struct ExpansionOptions {
    /// Zone whose wall clock recurrence rules follow.
    pub zone: Tz,
    /// Cap on occurrences produced for one event.
    pub max_occurrences: u16,
}

impl Default for ExpansionOptions {
    fn default() -> Self {
        Self {
            zone: chrono_tz::UTC,
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
        }
    }
}

/// ## Summary
/// Expands every event against the window.
///
/// A non-recurring event is kept only when it starts inside the window.
/// A recurring event yields one copy per occurrence start inside the window,
/// each with the parent's duration and its own id. An event whose rule does
/// not parse is treated as non-recurring.
#[must_use]
pub fn expand_occurrences(
    events: Vec<AcademicEvent>,
    window: &DateWindow,
    options: ExpansionOptions,
) -> Vec<AcademicEvent> {
    let mut expanded = Vec::with_capacity(events.len());

    for event in events {
        let Some(rule) = event.recurrence_rule() else {
            if window.contains(event.start) {
                expanded.push(event);
            }
            continue;
        };

        match RecurrenceSpec::parse(rule, event.start, options.zone) {
            Ok(spec) => {
                let spec = spec.with_limit(options.max_occurrences);
                let occurrences = spec.occurrences_between(window.start(), window.end());
                tracing::trace!(
                    id = %event.id,
                    count = occurrences.len(),
                    "Expanded recurring event"
                );
                expanded.extend(occurrences.into_iter().map(|at| event.occurrence_at(at)));
            }
            Err(err) => {
                tracing::warn!(
                    id = %event.id,
                    error = %err,
                    "Unusable recurrence rule, treating event as a single instance"
                );
                if window.contains(event.start) {
                    expanded.push(event);
                }
            }
        }
    }

    expanded
}
