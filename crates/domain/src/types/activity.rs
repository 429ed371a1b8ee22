//! Visit and interaction telemetry types

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;

/// Kind of user interaction being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Click,
    Scroll,
}

impl_wire_enum_conversions!(ActivityKind {
    Click => "click",
    Scroll => "scroll",
});

/// Opaque description of the element or document region an event targets,
/// e.g. `button#request-demo` or `document`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetDescriptor(String);

impl TargetDescriptor {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Descriptor used for scroll events on the page itself.
    pub fn document() -> Self {
        Self("document".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TargetDescriptor {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TargetDescriptor {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TargetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One observed user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub kind: ActivityKind,
    pub target: TargetDescriptor,
    pub occurred_at: DateTime<Utc>,
}

impl ActivityEvent {
    pub fn now(kind: ActivityKind, target: TargetDescriptor) -> Self {
        Self { kind, target, occurred_at: Utc::now() }
    }
}

/// Backend-assigned visit identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitId(String);

impl VisitId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VisitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a finished page session reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitSummary {
    /// Identifier, if the backend acknowledged the visit in time.
    pub visit_id: Option<VisitId>,
    pub started_at: DateTime<Utc>,
    pub time_on_page_ms: u64,
    /// Whether the final "update visit" call was sent and succeeded.
    pub update_sent: bool,
}

/// Body of the "record visit" call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordVisitRequest {
    pub started_at: DateTime<Utc>,
}

/// Body of the "update visit" call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateVisitRequest {
    pub time_on_page_ms: u64,
}

/// Body of the "report activity batch" call.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityBatchRequest<'a> {
    pub visit_id: Option<&'a VisitId>,
    pub events: &'a [ActivityEvent],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serializes_kind_lowercase_and_target_as_string() {
        let event = ActivityEvent::now(ActivityKind::Scroll, TargetDescriptor::document());
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["kind"], "scroll");
        assert_eq!(json["target"], "document");
        assert!(json["occurred_at"].is_string());
    }

    #[test]
    fn batch_request_carries_visit_id_or_null() {
        let events = vec![ActivityEvent::now(ActivityKind::Click, "a#contact".into())];
        let id = VisitId::new("v-42");

        let with_id =
            serde_json::to_value(ActivityBatchRequest { visit_id: Some(&id), events: &events })
                .unwrap();
        assert_eq!(with_id["visit_id"], "v-42");
        assert_eq!(with_id["events"][0]["target"], "a#contact");

        let without =
            serde_json::to_value(ActivityBatchRequest { visit_id: None, events: &events }).unwrap();
        assert!(without["visit_id"].is_null());
    }

    #[test]
    fn kind_parses_from_wire_string() {
        assert_eq!("click".parse::<ActivityKind>().unwrap(), ActivityKind::Click);
        assert_eq!(ActivityKind::Scroll.to_string(), "scroll");
    }
}
