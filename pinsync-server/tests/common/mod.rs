#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use pinsync_api::models::{Controller, PinConfig, PinId, TimeWindow, Weekday};
use pinsync_server::services::{FixedClock, Reconciler};
use pinsync_server::tests::MockBackend;
use time::OffsetDateTime;
use time::macros::datetime;

/// 23:50 on Monday 2025-04-07 in US/Arizona
pub const LATE_EVENING: OffsetDateTime = datetime!(2025-04-08 06:50:00 UTC);

/// 12:00 on Monday 2025-04-07 in US/Arizona
pub const NOON: OffsetDateTime = datetime!(2025-04-07 19:00:00 UTC);

pub const MONDAY: Weekday = 1;

pub fn reconciler(backend: &Arc<MockBackend>, now: OffsetDateTime) -> Reconciler<Arc<MockBackend>> {
    Reconciler::new(backend.clone()).with_clock(FixedClock::new(now, MONDAY))
}

/// Drop every pin of `controller`
pub fn without_pins(mut controller: Controller) -> Controller {
    controller.pins.clear();
    controller
}

/// Add or replace pin `pin` with a schedule for the given days
pub fn with_pin(mut controller: Controller, pin: &str, name: &str, days: &[(Weekday, &str, &str)]) -> Controller {
    let schedule: BTreeMap<Weekday, TimeWindow> = days
        .iter()
        .map(|(day, on, off)| (*day, TimeWindow::new(*on, *off)))
        .collect();

    controller.pins.insert(
        PinId::from(pin),
        PinConfig {
            name: name.to_string(),
            schedule,
        },
    );

    controller
}
