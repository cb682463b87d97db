pub mod executor;
pub mod reconcile;
pub mod schedule;
pub mod snapshot;

pub use executor::ExecutorError;
pub use reconcile::ReconcileError;
pub use schedule::{PinError, ScheduleError};
pub use snapshot::SnapshotError;
