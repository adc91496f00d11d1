//! Attempt sinks. Forward retry records to tracing, or keep them in memory.

use crate::domain::AttemptRecord;
use crate::ports::AttemptSink;
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Emits each retry as a structured `warn!` line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAttemptSink;

impl AttemptSink for TracingAttemptSink {
    fn record(&self, record: &AttemptRecord) {
        warn!(
            action = %record.action,
            attempt = record.attempt_number,
            delay_ms = record.delay_ms(),
            code = %record.error.code(),
            retryable = record.error.is_retryable(),
            "transient failure, retrying admin operation"
        );
    }
}

/// Collects records; used by tests and diagnostics.
#[derive(Debug, Default)]
pub struct MemoryAttemptSink {
    records: Mutex<Vec<AttemptRecord>>,
}

impl MemoryAttemptSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AttemptRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AttemptSink for MemoryAttemptSink {
    fn record(&self, record: &AttemptRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
    }
}
