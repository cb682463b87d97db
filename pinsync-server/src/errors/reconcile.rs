use super::{ExecutorError, SnapshotError};
use crate::services::freshness::round_tenths;

/// Failure that marks a whole controller as unsuccessful
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Cache miss")]
    CacheMiss,

    #[error("Cache expired ({:.1} minutes old)", tenths(.age_minutes))]
    CacheExpired { age_minutes: f64 },

    #[error("Failed to read cached data: {0}")]
    SnapshotRead(#[from] SnapshotError),

    #[error("Failed to execute schedule updates: {0}")]
    Execution(#[from] ExecutorError),
}

fn tenths(minutes: &f64) -> f64 {
    round_tenths(*minutes)
}
