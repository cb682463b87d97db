mod clock;
mod executor_service;
pub mod freshness;
mod reconcile_service;
pub mod schedule;
mod snapshot_service;

pub use clock::*;
pub use executor_service::*;
pub use freshness::{DEFAULT_CACHE_TTL, FreshnessGate};
pub use reconcile_service::*;
pub use schedule::{PinDecision, should_execute_pin};
pub use snapshot_service::*;
