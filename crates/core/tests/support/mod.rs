//! Shared test doubles for core integration tests

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use veriprint_core::{ActivityReporter, AnalyticsBackend, ReporterConfig};
use veriprint_domain::{ActivityEvent, Result, VisitId};

/// Analytics backend that acknowledges everything and remembers each call.
#[derive(Default)]
pub struct CountingBackend {
    pub visits: Mutex<usize>,
    pub updates: Mutex<Vec<u64>>,
    pub batches: Mutex<Vec<Vec<ActivityEvent>>>,
}

impl CountingBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn batch_count(&self) -> usize {
        self.batches.lock().len()
    }

    pub fn all_targets(&self) -> Vec<String> {
        self.batches.lock().iter().flatten().map(|e| e.target.to_string()).collect()
    }
}

#[async_trait]
impl AnalyticsBackend for CountingBackend {
    async fn record_visit(&self, _started_at: DateTime<Utc>) -> Result<VisitId> {
        let mut visits = self.visits.lock();
        *visits += 1;
        Ok(VisitId::new(format!("visit-{}", *visits)))
    }

    async fn update_visit(&self, _visit_id: &VisitId, time_on_page_ms: u64) -> Result<()> {
        self.updates.lock().push(time_on_page_ms);
        Ok(())
    }

    async fn report_activity(
        &self,
        _visit_id: Option<&VisitId>,
        events: &[ActivityEvent],
    ) -> Result<()> {
        self.batches.lock().push(events.to_vec());
        Ok(())
    }
}

pub fn reporter(backend: &Arc<CountingBackend>, config: ReporterConfig) -> ActivityReporter {
    let backend: Arc<dyn AnalyticsBackend> = backend.clone();
    ActivityReporter::new(backend, config)
}
