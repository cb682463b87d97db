mod controller;
mod execution;
mod pin;
mod schedule;
mod snapshot;

pub use controller::*;
pub use execution::*;
pub use pin::*;
pub use schedule::*;
pub use snapshot::*;

/// Weekday index as used by schedules, Sunday = 0 through Saturday = 6
pub type Weekday = u8;

/// Minutes in a day, the wrap-around span of a time-of-day
pub const MINUTES_PER_DAY: u16 = 24 * 60;
