use chrono::Datelike;
use pinsync_api::models::Weekday;
use time::OffsetDateTime;

pub trait Clock: Send + Sync {
    /// Current wall-clock instant
    fn now_utc(&self) -> OffsetDateTime;

    /// Weekday that selects the schedule entry, Sunday = 0
    fn local_weekday(&self) -> Weekday;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    // NOTE: taken from the host clock, not from the controller timezone that
    // drives the on/off comparison. Near local midnight the two may disagree
    // on the day; switching to the controller zone only needs to happen here.
    fn local_weekday(&self) -> Weekday {
        chrono::Local::now().weekday().num_days_from_sunday() as Weekday
    }
}

/// Clock frozen at one instant, weekday given explicitly
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub now: OffsetDateTime,
    pub weekday: Weekday,
}

impl FixedClock {
    pub fn new(now: OffsetDateTime, weekday: Weekday) -> Self {
        Self { now, weekday }
    }

    /// Weekday derived from the UTC date of `now`
    pub fn at(now: OffsetDateTime) -> Self {
        Self {
            now,
            weekday: now.weekday().number_days_from_sunday(),
        }
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> OffsetDateTime {
        self.now
    }

    fn local_weekday(&self) -> Weekday {
        self.weekday
    }
}
