//! In-memory buffer of interaction events awaiting the next flush

use parking_lot::Mutex;
use veriprint_domain::ActivityEvent;

/// FIFO buffer owned by a single reporter.
///
/// Appends and drains are serialized by one lock, so a drain takes exactly
/// the events appended before it and none appended after it.
#[derive(Debug, Default)]
pub struct ActivityQueue {
    events: Mutex<Vec<ActivityEvent>>,
}

impl ActivityQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: ActivityEvent) {
        self.events.lock().push(event);
    }

    /// Take every buffered event, leaving the buffer empty.
    pub fn drain(&self) -> Vec<ActivityEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}
