//! Page-session activity reporter
//!
//! Records one visit per session and ships interaction events to the
//! analytics backend in periodic batches. Every backend call is best-effort:
//! failures are logged and dropped, never retried and never surfaced.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use veriprint_domain::{
    ActivityConfig, ActivityEvent, ActivityKind, TargetDescriptor, VisitId, VisitSummary,
};

use super::ports::AnalyticsBackend;
use super::queue::ActivityQueue;

/// Configuration for [`ActivityReporter`]
#[derive(Debug, Clone)]
pub struct ReporterConfig {
    /// How often buffered events are flushed
    pub flush_interval: Duration,
    /// Upper bound for each call made while stopping
    pub unload_timeout: Duration,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        ActivityConfig::default().into()
    }
}

impl From<ActivityConfig> for ReporterConfig {
    fn from(config: ActivityConfig) -> Self {
        Self { flush_interval: config.flush_interval(), unload_timeout: config.unload_timeout() }
    }
}

/// Lifecycle errors. Telemetry failures never show up here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReporterError {
    #[error("activity reporter already running")]
    AlreadyRunning,

    #[error("activity reporter already stopped; create a new one per page session")]
    Stopped,

    #[error("activity reporter must be started from within a tokio runtime")]
    NoRuntime,
}

struct Session {
    started_at: DateTime<Utc>,
    started: Instant,
    cancel: CancellationToken,
    flush_task: JoinHandle<()>,
    record_task: JoinHandle<()>,
}

enum Lifecycle {
    Idle,
    Running(Session),
    Stopped,
}

/// Visit and interaction telemetry for one page session.
///
/// Construct one per session, call [`start`](Self::start) once the page is
/// interactive and [`stop`](Self::stop) when it is torn down. Dropping a
/// running reporter cancels its background tasks.
pub struct ActivityReporter {
    backend: Arc<dyn AnalyticsBackend>,
    config: ReporterConfig,
    queue: Arc<ActivityQueue>,
    visit_id: Arc<Mutex<Option<VisitId>>>,
    lifecycle: Mutex<Lifecycle>,
}

impl ActivityReporter {
    pub fn new(backend: Arc<dyn AnalyticsBackend>, config: ReporterConfig) -> Self {
        Self {
            backend,
            config,
            queue: Arc::new(ActivityQueue::new()),
            visit_id: Arc::new(Mutex::new(None)),
            lifecycle: Mutex::new(Lifecycle::Idle),
        }
    }

    /// Start the session.
    ///
    /// Spawns the "record visit" call and the periodic flush loop, then
    /// returns without waiting on the network.
    ///
    /// # Errors
    ///
    /// Returns error if the reporter was already started or stopped, or if
    /// called outside a tokio runtime.
    #[instrument(skip(self))]
    pub fn start(&self) -> Result<(), ReporterError> {
        let mut lifecycle = self.lifecycle.lock();
        match *lifecycle {
            Lifecycle::Running(_) => return Err(ReporterError::AlreadyRunning),
            Lifecycle::Stopped => return Err(ReporterError::Stopped),
            Lifecycle::Idle => {}
        }

        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| ReporterError::NoRuntime)?;

        let started_at = Utc::now();
        let started = Instant::now();
        let cancel = CancellationToken::new();

        let record_task = runtime.spawn(Self::record_visit(
            Arc::clone(&self.backend),
            Arc::clone(&self.visit_id),
            started_at,
            cancel.clone(),
        ));

        let flush_task = runtime.spawn(Self::flush_loop(
            Arc::clone(&self.backend),
            Arc::clone(&self.queue),
            Arc::clone(&self.visit_id),
            self.config.flush_interval,
            cancel.clone(),
        ));

        *lifecycle =
            Lifecycle::Running(Session { started_at, started, cancel, flush_task, record_task });

        info!(flush_interval_ms = millis(self.config.flush_interval), "activity reporter started");
        Ok(())
    }

    /// Buffer one interaction for the next flush.
    ///
    /// Never blocks on I/O and never fails. Events queued after
    /// [`stop`](Self::stop) are discarded.
    pub fn queue_activity(&self, kind: ActivityKind, target: impl Into<TargetDescriptor>) {
        if matches!(*self.lifecycle.lock(), Lifecycle::Stopped) {
            debug!(%kind, "activity queued after stop; discarding");
            return;
        }
        self.queue.push(ActivityEvent::now(kind, target.into()));
    }

    /// Send everything buffered so far as one batch.
    ///
    /// Returns the number of events taken from the buffer. An empty buffer
    /// sends nothing.
    pub async fn flush(&self) -> usize {
        Self::flush_batch(self.backend.as_ref(), &self.queue, &self.visit_id).await
    }

    /// End the session.
    ///
    /// Cancels the flush loop and any unanswered "record visit" call, flushes
    /// what is still buffered, then reports time-on-page if the backend
    /// assigned a visit identifier. Each call is bounded by the unload
    /// timeout. Returns `None` if the reporter was not running.
    #[instrument(skip(self))]
    pub async fn stop(&self) -> Option<VisitSummary> {
        let session = {
            let mut lifecycle = self.lifecycle.lock();
            match std::mem::replace(&mut *lifecycle, Lifecycle::Stopped) {
                Lifecycle::Running(session) => session,
                Lifecycle::Idle => {
                    *lifecycle = Lifecycle::Idle;
                    return None;
                }
                Lifecycle::Stopped => return None,
            }
        };

        let time_on_page_ms = millis(session.started.elapsed());
        session.cancel.cancel();

        let timeout = self.config.unload_timeout;
        join_with_timeout("flush loop", session.flush_task, timeout).await;
        join_with_timeout("visit recording", session.record_task, timeout).await;

        if tokio::time::timeout(timeout, self.flush()).await.is_err() {
            warn!("final activity flush did not complete within unload timeout");
        }

        let visit_id = self.visit_id.lock().clone();
        let update_sent = match &visit_id {
            None => {
                debug!("visit was never acknowledged; skipping update");
                false
            }
            Some(id) => {
                match tokio::time::timeout(timeout, self.backend.update_visit(id, time_on_page_ms))
                    .await
                {
                    Ok(Ok(())) => true,
                    Ok(Err(err)) => {
                        warn!(visit_id = %id, error = %err, "failed to update visit");
                        false
                    }
                    Err(_) => {
                        warn!(visit_id = %id, "visit update timed out during unload");
                        false
                    }
                }
            }
        };

        info!(time_on_page_ms, update_sent, "activity reporter stopped");

        Some(VisitSummary { visit_id, started_at: session.started_at, time_on_page_ms, update_sent })
    }

    /// Identifier assigned by the backend, once it has answered.
    pub fn visit_id(&self) -> Option<VisitId> {
        self.visit_id.lock().clone()
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    pub fn is_running(&self) -> bool {
        matches!(*self.lifecycle.lock(), Lifecycle::Running(_))
    }

    async fn record_visit(
        backend: Arc<dyn AnalyticsBackend>,
        visit_id: Arc<Mutex<Option<VisitId>>>,
        started_at: DateTime<Utc>,
        cancel: CancellationToken,
    ) {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("session ended before the visit was acknowledged");
            }
            result = backend.record_visit(started_at) => match result {
                Ok(id) => {
                    debug!(visit_id = %id, "visit recorded");
                    *visit_id.lock() = Some(id);
                }
                Err(err) => {
                    warn!(error = %err, "failed to record visit; visit updates will be skipped");
                }
            },
        }
    }

    async fn flush_loop(
        backend: Arc<dyn AnalyticsBackend>,
        queue: Arc<ActivityQueue>,
        visit_id: Arc<Mutex<Option<VisitId>>>,
        interval: Duration,
        cancel: CancellationToken,
    ) {
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    debug!("flush loop cancelled");
                    break;
                }
                () = tokio::time::sleep(interval) => {
                    Self::flush_batch(backend.as_ref(), &queue, &visit_id).await;
                }
            }
        }
    }

    async fn flush_batch(
        backend: &dyn AnalyticsBackend,
        queue: &ActivityQueue,
        visit_id: &Mutex<Option<VisitId>>,
    ) -> usize {
        let batch = queue.drain();
        if batch.is_empty() {
            return 0;
        }

        let id = visit_id.lock().clone();
        let count = batch.len();
        match backend.report_activity(id.as_ref(), &batch).await {
            Ok(()) => debug!(count, "activity batch reported"),
            Err(err) => warn!(count, error = %err, "failed to report activity batch; dropping it"),
        }
        count
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

async fn join_with_timeout(task: &'static str, handle: JoinHandle<()>, timeout: Duration) {
    let abort = handle.abort_handle();
    match tokio::time::timeout(timeout, handle).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) if err.is_cancelled() => {}
        Ok(Err(err)) => warn!(task, error = %err, "reporter task panicked"),
        Err(_) => {
            warn!(task, "reporter task did not finish within unload timeout; aborting");
            abort.abort();
        }
    }
}

/// Ensure background tasks are released when the session is dropped
impl Drop for ActivityReporter {
    fn drop(&mut self) {
        if let Lifecycle::Running(session) = &*self.lifecycle.get_mut() {
            warn!("ActivityReporter dropped while running; cancelling");
            session.cancel.cancel();
            session.flush_task.abort();
            session.record_task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use veriprint_domain::{Result, VeriprintError};

    use super::*;

    #[derive(Debug, Clone, Copy)]
    enum RecordBehaviour {
        Acknowledge,
        Fail,
        Hang,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct ReportedBatch {
        visit_id: Option<String>,
        targets: Vec<String>,
    }

    struct RecordingBackend {
        record: RecordBehaviour,
        fail_reports: bool,
        records: Mutex<usize>,
        updates: Mutex<Vec<(String, u64)>>,
        batches: Mutex<Vec<ReportedBatch>>,
    }

    impl RecordingBackend {
        fn new(record: RecordBehaviour) -> Arc<Self> {
            Arc::new(Self {
                record,
                fail_reports: false,
                records: Mutex::new(0),
                updates: Mutex::new(Vec::new()),
                batches: Mutex::new(Vec::new()),
            })
        }

        fn failing_reports() -> Arc<Self> {
            Arc::new(Self {
                record: RecordBehaviour::Acknowledge,
                fail_reports: true,
                records: Mutex::new(0),
                updates: Mutex::new(Vec::new()),
                batches: Mutex::new(Vec::new()),
            })
        }

        fn batches(&self) -> Vec<ReportedBatch> {
            self.batches.lock().clone()
        }

        fn updates(&self) -> Vec<(String, u64)> {
            self.updates.lock().clone()
        }
    }

    #[async_trait]
    impl AnalyticsBackend for RecordingBackend {
        async fn record_visit(&self, _started_at: DateTime<Utc>) -> Result<VisitId> {
            *self.records.lock() += 1;
            match self.record {
                RecordBehaviour::Acknowledge => Ok(VisitId::new("v-1")),
                RecordBehaviour::Fail => Err(VeriprintError::Network("connection refused".into())),
                RecordBehaviour::Hang => std::future::pending().await,
            }
        }

        async fn update_visit(&self, visit_id: &VisitId, time_on_page_ms: u64) -> Result<()> {
            self.updates.lock().push((visit_id.to_string(), time_on_page_ms));
            Ok(())
        }

        async fn report_activity(
            &self,
            visit_id: Option<&VisitId>,
            events: &[ActivityEvent],
        ) -> Result<()> {
            self.batches.lock().push(ReportedBatch {
                visit_id: visit_id.map(ToString::to_string),
                targets: events.iter().map(|e| e.target.to_string()).collect(),
            });
            if self.fail_reports {
                return Err(VeriprintError::Upstream { status: 500, message: "boom".into() });
            }
            Ok(())
        }
    }

    fn config() -> ReporterConfig {
        ReporterConfig {
            flush_interval: Duration::from_secs(4),
            unload_timeout: Duration::from_secs(2),
        }
    }

    fn reporter(backend: &Arc<RecordingBackend>) -> ActivityReporter {
        let backend: Arc<dyn AnalyticsBackend> = backend.clone();
        ActivityReporter::new(backend, config())
    }

    #[tokio::test]
    async fn flush_sends_queued_events_in_call_order() {
        let backend = RecordingBackend::new(RecordBehaviour::Acknowledge);
        let reporter = reporter(&backend);

        reporter.queue_activity(ActivityKind::Click, "button#demo");
        reporter.queue_activity(ActivityKind::Scroll, TargetDescriptor::document());
        reporter.queue_activity(ActivityKind::Click, "a#careers");

        assert_eq!(reporter.flush().await, 3);
        assert_eq!(
            backend.batches(),
            vec![ReportedBatch {
                visit_id: None,
                targets: vec!["button#demo".into(), "document".into(), "a#careers".into()],
            }]
        );
        assert_eq!(reporter.pending_events(), 0);
    }

    #[tokio::test]
    async fn empty_buffer_sends_nothing() {
        let backend = RecordingBackend::new(RecordBehaviour::Acknowledge);
        let reporter = reporter(&backend);

        assert_eq!(reporter.flush().await, 0);
        assert!(backend.batches().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn periodic_flush_sends_one_batch_per_window() {
        let backend = RecordingBackend::new(RecordBehaviour::Acknowledge);
        let reporter = reporter(&backend);
        reporter.start().unwrap();

        reporter.queue_activity(ActivityKind::Click, "first");
        reporter.queue_activity(ActivityKind::Click, "second");
        tokio::time::sleep(Duration::from_millis(4100)).await;

        reporter.queue_activity(ActivityKind::Scroll, "third");
        tokio::time::sleep(Duration::from_secs(4)).await;

        let batches = backend.batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].targets, vec!["first".to_string(), "second".to_string()]);
        assert_eq!(batches[1].targets, vec!["third".to_string()]);
        assert_eq!(batches[0].visit_id.as_deref(), Some("v-1"));

        reporter.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn idle_windows_produce_no_batches() {
        let backend = RecordingBackend::new(RecordBehaviour::Acknowledge);
        let reporter = reporter(&backend);
        reporter.start().unwrap();

        tokio::time::sleep(Duration::from_secs(20)).await;
        reporter.stop().await;

        assert!(backend.batches().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_before_acknowledgement_skips_update() {
        let backend = RecordingBackend::new(RecordBehaviour::Hang);
        let reporter = reporter(&backend);

        reporter.start().unwrap();
        let summary = reporter.stop().await.unwrap();

        assert_eq!(summary.visit_id, None);
        assert!(!summary.update_sent);
        assert!(backend.updates().is_empty());
        assert!(!reporter.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_reports_time_on_page() {
        let backend = RecordingBackend::new(RecordBehaviour::Acknowledge);
        let reporter = reporter(&backend);

        reporter.start().unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        let summary = reporter.stop().await.unwrap();

        assert_eq!(summary.visit_id, Some(VisitId::new("v-1")));
        assert!(summary.update_sent);
        let updates = backend.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, "v-1");
        assert!(updates[0].1 >= 1500, "elapsed was {}", updates[0].1);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_recording_is_swallowed_and_skips_update() {
        let backend = RecordingBackend::new(RecordBehaviour::Fail);
        let reporter = reporter(&backend);

        reporter.start().unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        let summary = reporter.stop().await.unwrap();

        assert_eq!(*backend.records.lock(), 1);
        assert_eq!(summary.visit_id, None);
        assert!(backend.updates().is_empty());
    }

    #[tokio::test]
    async fn failed_batch_is_dropped_not_requeued() {
        let backend = RecordingBackend::failing_reports();
        let reporter = reporter(&backend);

        reporter.queue_activity(ActivityKind::Click, "cta");
        assert_eq!(reporter.flush().await, 1);
        assert_eq!(reporter.pending_events(), 0);
        assert_eq!(reporter.flush().await, 0);
        assert_eq!(backend.batches().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_flushes_partial_batch_once() {
        let backend = RecordingBackend::new(RecordBehaviour::Acknowledge);
        let reporter = reporter(&backend);
        reporter.start().unwrap();

        reporter.queue_activity(ActivityKind::Click, "late");
        reporter.stop().await;

        let batches = backend.batches();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].targets, vec!["late".to_string()]);
    }

    #[tokio::test]
    async fn lifecycle_rejects_double_start_and_restart() {
        let backend = RecordingBackend::new(RecordBehaviour::Acknowledge);
        let reporter = reporter(&backend);

        assert!(!reporter.is_running());
        assert_eq!(reporter.stop().await, None);

        reporter.start().unwrap();
        assert!(reporter.is_running());
        assert_eq!(reporter.start(), Err(ReporterError::AlreadyRunning));

        assert!(reporter.stop().await.is_some());
        assert_eq!(reporter.stop().await, None);
        assert_eq!(reporter.start(), Err(ReporterError::Stopped));
    }

    #[tokio::test]
    async fn events_after_stop_are_discarded() {
        let backend = RecordingBackend::new(RecordBehaviour::Acknowledge);
        let reporter = reporter(&backend);
        reporter.start().unwrap();
        reporter.stop().await;

        reporter.queue_activity(ActivityKind::Click, "ignored");
        assert_eq!(reporter.pending_events(), 0);
    }

    #[test]
    fn start_outside_runtime_is_an_error() {
        let backend = RecordingBackend::new(RecordBehaviour::Acknowledge);
        let reporter = reporter(&backend);

        assert_eq!(reporter.start(), Err(ReporterError::NoRuntime));
        assert!(!reporter.is_running());
    }
}
