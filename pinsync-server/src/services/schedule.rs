use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use pinsync_api::models::{ClockTime, MINUTES_PER_DAY, PinState, TimeWindow};
use time::OffsetDateTime;
use tracing::error;

use crate::errors::ScheduleError;

/// Verdict for one pin at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinDecision {
    /// Reported state differs from the scheduled one
    pub should_execute: bool,
    /// Controller-local time the verdict was taken at
    pub local_time: ClockTime,
}

impl PinDecision {
    /// Outcome used when a window cannot be evaluated
    pub const UNKNOWN: PinDecision = PinDecision {
        should_execute: false,
        local_time: ClockTime::MIDNIGHT,
    };
}

/// Decide whether a pin must be switched.
///
/// Never fails: an unknown timezone or a malformed window is logged and
/// yields [`PinDecision::UNKNOWN`] so the remaining pins still get evaluated.
pub fn should_execute_pin(window: &TimeWindow, status: PinState, timezone: &str, now: OffsetDateTime) -> PinDecision {
    evaluate_window(window, status, timezone, now).unwrap_or_else(|e| {
        error!(timezone, on = %window.on, off = %window.off, "Failed to evaluate schedule window: {}", e);
        PinDecision::UNKNOWN
    })
}

pub fn evaluate_window(
    window: &TimeWindow,
    status: PinState,
    timezone: &str,
    now: OffsetDateTime,
) -> Result<PinDecision, ScheduleError> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| ScheduleError::InvalidTimezone(timezone.to_string()))?;

    let (on, off) = window.bounds().map_err(|_| ScheduleError::InvalidTimeFormat {
        on: window.on.clone(),
        off: window.off.clone(),
    })?;

    let local_time = local_time_of_day(now, tz)?;
    let active = window_is_active(on, off, local_time);

    let should_execute = match status {
        PinState::On => !active,
        PinState::Off => active,
        PinState::Unknown => false,
    };

    Ok(PinDecision { should_execute, local_time })
}

/// Half-open `[on, off)` membership; `off <= on` wraps past midnight
pub fn window_is_active(on: ClockTime, off: ClockTime, current: ClockTime) -> bool {
    let on = on.minutes();
    let mut off = off.minutes();
    let mut current = current.minutes();

    if off <= on {
        off += MINUTES_PER_DAY;
        if current < on {
            current += MINUTES_PER_DAY;
        }
    }

    on <= current && current < off
}

/// Wall-clock time in `tz`, truncated to the minute
fn local_time_of_day(now: OffsetDateTime, tz: Tz) -> Result<ClockTime, ScheduleError> {
    let utc = DateTime::<Utc>::from_timestamp(now.unix_timestamp(), 0).ok_or(ScheduleError::ClockOutOfRange)?;
    let local = utc.with_timezone(&tz);

    Ok(ClockTime::from_minutes((local.hour() * 60 + local.minute()) as u16))
}
