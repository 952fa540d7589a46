use std::fmt;

use crate::contract::{
    LifecycleEvent, DB_INSTANCE_SOURCE_TYPE, NEW_INSTANCE_EVENT_ID, RDS_EVENT_SOURCE,
    RDS_INSTANCE_EVENT_DETAIL_TYPE,
};

/// Why an event was not acted upon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoredEvent {
    UnexpectedSource(String),
    UnexpectedDetailType(String),
    UnexpectedEventId(String),
    UnexpectedSourceType(String),
    MissingSourceIdentifier,
}

impl fmt::Display for IgnoredEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedSource(source) => write!(f, "event source '{source}' is not tracked"),
            Self::UnexpectedDetailType(detail_type) => {
                write!(f, "detail type '{detail_type}' is not tracked")
            }
            Self::UnexpectedEventId(event_id) => {
                write!(f, "event id '{event_id}' is not {NEW_INSTANCE_EVENT_ID}")
            }
            Self::UnexpectedSourceType(source_type) => {
                write!(f, "source type '{source_type}' is not {DB_INSTANCE_SOURCE_TYPE}")
            }
            Self::MissingSourceIdentifier => f.write_str("event has no source identifier"),
        }
    }
}

/// Returns the instance identifier of a "new DB instance created" event.
///
/// The EventBridge rule already narrows delivery to this event; the check is
/// repeated here so a misrouted or hand-invoked payload has no side effects.
pub fn relevant_source_identifier(event: &LifecycleEvent) -> Result<&str, IgnoredEvent> {
    if event.source != RDS_EVENT_SOURCE {
        return Err(IgnoredEvent::UnexpectedSource(event.source.clone()));
    }

    if event.detail_type != RDS_INSTANCE_EVENT_DETAIL_TYPE {
        return Err(IgnoredEvent::UnexpectedDetailType(event.detail_type.clone()));
    }

    let detail = &event.detail;
    if detail.event_id != NEW_INSTANCE_EVENT_ID {
        return Err(IgnoredEvent::UnexpectedEventId(detail.event_id.clone()));
    }

    if !detail.source_type.is_empty() && detail.source_type != DB_INSTANCE_SOURCE_TYPE {
        return Err(IgnoredEvent::UnexpectedSourceType(detail.source_type.clone()));
    }

    let source_identifier = detail.source_identifier.trim();
    if source_identifier.is_empty() {
        return Err(IgnoredEvent::MissingSourceIdentifier);
    }

    Ok(source_identifier)
}
