use pinsync_api::models::Weekday;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid time format: on={on}, off={off}")]
    InvalidTimeFormat { on: String, off: String },

    #[error("Current time is out of the supported range")]
    ClockOutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PinError {
    #[error("No schedule defined for weekday {weekday}")]
    MissingSchedule { weekday: Weekday },
}
