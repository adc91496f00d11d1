//! Attempt sink port. Receives one record per scheduled retry.

use crate::domain::AttemptRecord;

/// Logging boundary for the retry loop. Must not block.
pub trait AttemptSink: Send + Sync {
    fn record(&self, record: &AttemptRecord);
}
