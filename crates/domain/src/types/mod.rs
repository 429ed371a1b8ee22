//! Domain types and models

pub mod activity;
pub mod site;

pub use activity::{
    ActivityBatchRequest, ActivityEvent, ActivityKind, RecordVisitRequest, TargetDescriptor,
    UpdateVisitRequest, VisitId, VisitSummary,
};
pub use site::{GateDecision, SiteHeaderData, SiteHeaderResponse, SiteStatus};
