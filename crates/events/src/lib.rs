//! # Vantage Events
//!
//! Turns the event lists returned by the event detection endpoints into what an
//! event dashboard shows: a month-by-month timeline, the subset matching the
//! filter panel, per-type impact statistics and typed metadata.
//!
//! As a Layer 1 crate, it depends only on `core-types`.

// Declare the modules that make up this crate.
pub mod details;
pub mod error;
pub mod filter;
pub mod summary;
pub mod timeline;

// Re-export the core types to provide a clean public API.
pub use details::EventDetails;
pub use error::EventsError;
pub use filter::{apply_filters, matches};
pub use summary::{TypeImpactSummary, summarize_by_type};
pub use timeline::{MonthGroup, Timeline, UNKNOWN_DATE_KEY, group_by_month};

use core_types::Event;
use serde::Deserialize;

/// The shapes an event list arrives in: a bare array, or wrapped in an `events` field.
#[derive(Deserialize)]
#[serde(untagged)]
enum EventPayload {
    List(Vec<Event>),
    Wrapped { events: Vec<Event> },
}

/// Decodes an event list from a JSON response body.
pub fn parse_events(json: &str) -> Result<Vec<Event>, EventsError> {
    let events = match serde_json::from_str::<EventPayload>(json)? {
        EventPayload::List(events) | EventPayload::Wrapped { events } => events,
    };
    tracing::debug!(count = events.len(), "Decoded event payload.");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bare_and_wrapped_lists() {
        let bare = r#"[{"id":"1","type":"earnings","date":"2023-01-15"}]"#;
        let wrapped = r#"{"events":[{"id":"1","event_type":"earnings","date":"2023-01-15"}]}"#;
        assert_eq!(parse_events(bare).unwrap(), parse_events(wrapped).unwrap());
    }

    #[test]
    fn rejects_malformed_payloads() {
        assert!(matches!(
            parse_events(r#"{"items": []}"#),
            Err(EventsError::Deserialization(_))
        ));
    }
}
