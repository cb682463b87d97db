use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::MINUTES_PER_DAY;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid time of day: {0:?}, expected HH:MM")]
pub struct TimeFormatError(pub String);

/// A 24-hour wall-clock time with minute granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hours: u8,
    minutes: u8,
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime { hours: 0, minutes: 0 };

    /// Parse a strict `HH:MM` string, hours 00-23 and minutes 00-59
    pub fn parse(value: &str) -> Result<Self, TimeFormatError> {
        let invalid = || TimeFormatError(value.to_string());
        let bytes = value.as_bytes();

        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }

        let digit = |index: usize| -> Result<u8, TimeFormatError> {
            let byte = bytes[index];
            if byte.is_ascii_digit() { Ok(byte - b'0') } else { Err(invalid()) }
        };

        let hours = digit(0)? * 10 + digit(1)?;
        let minutes = digit(3)? * 10 + digit(4)?;

        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }

        Ok(Self { hours, minutes })
    }

    /// Build from minutes since midnight, wrapping past a full day
    pub fn from_minutes(total: u16) -> Self {
        let total = total % MINUTES_PER_DAY;
        Self {
            hours: (total / 60) as u8,
            minutes: (total % 60) as u8,
        }
    }

    pub fn hours(&self) -> u8 {
        self.hours
    }

    pub fn minute(&self) -> u8 {
        self.minutes
    }

    /// Minutes since midnight, 0-1439
    pub fn minutes(&self) -> u16 {
        self.hours as u16 * 60 + self.minutes as u16
    }
}

impl FromStr for ClockTime {
    type Err = TimeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClockTime::parse(s)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

/// Daily on/off window of a pin in controller-local time.
///
/// Bounds stay as the raw strings of the schedule document; they are
/// validated when the window is evaluated so one malformed day never
/// rejects a whole controller. The window wraps past midnight when
/// `off <= on`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Switch-on time, `HH:MM`
    pub on: String,
    /// Switch-off time, `HH:MM`
    pub off: String,
}

impl TimeWindow {
    pub fn new(on: impl Into<String>, off: impl Into<String>) -> Self {
        Self { on: on.into(), off: off.into() }
    }

    pub fn bounds(&self) -> Result<(ClockTime, ClockTime), TimeFormatError> {
        Ok((ClockTime::parse(&self.on)?, ClockTime::parse(&self.off)?))
    }
}
