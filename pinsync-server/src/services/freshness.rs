use std::time::Duration;

use pinsync_api::models::Snapshot;
use time::OffsetDateTime;

/// Snapshot validity window
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Decides whether a device-state snapshot is recent enough to act on
#[derive(Debug, Clone, Copy)]
pub struct FreshnessGate {
    ttl: Duration,
}

impl FreshnessGate {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// A timestamp ahead of `now` counts as fresh.
    pub fn is_fresh_at(&self, snapshot: &Snapshot, now: OffsetDateTime) -> bool {
        age_seconds(snapshot, now) < self.ttl.as_secs_f64()
    }

    pub fn is_fresh(&self, snapshot: &Snapshot) -> bool {
        self.is_fresh_at(snapshot, OffsetDateTime::now_utc())
    }
}

impl Default for FreshnessGate {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

fn age_seconds(snapshot: &Snapshot, now: OffsetDateTime) -> f64 {
    (now - snapshot.timestamp).as_seconds_f64()
}

/// Age of a snapshot in minutes, as reported for expired caches
pub fn age_minutes(snapshot: &Snapshot, now: OffsetDateTime) -> f64 {
    age_seconds(snapshot, now) / 60.0
}

/// Round to one decimal, ties upward (10.25 -> 10.3)
pub fn round_tenths(minutes: f64) -> f64 {
    (minutes * 10.0 + 0.5).floor() / 10.0
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    const NOW: OffsetDateTime = datetime!(2025-04-07 10:30:00 UTC);

    fn snapshot_at(timestamp: OffsetDateTime) -> Snapshot {
        Snapshot::new("location-uuid", "controller-uuid", timestamp)
    }

    #[test]
    fn test_recent_snapshot_is_fresh() {
        let gate = FreshnessGate::default();

        assert!(gate.is_fresh_at(&snapshot_at(NOW), NOW));
        assert!(gate.is_fresh_at(&snapshot_at(datetime!(2025-04-07 10:25:01 UTC)), NOW));
    }

    #[test]
    fn test_snapshot_at_ttl_is_stale() {
        let gate = FreshnessGate::default();

        assert!(!gate.is_fresh_at(&snapshot_at(datetime!(2025-04-07 10:25:00 UTC)), NOW));
        assert!(!gate.is_fresh_at(&snapshot_at(datetime!(2025-04-07 08:00:00 UTC)), NOW));
    }

    #[test]
    fn test_future_snapshot_is_fresh() {
        let gate = FreshnessGate::new(Duration::from_secs(60));
        assert!(gate.is_fresh_at(&snapshot_at(datetime!(2025-04-07 10:45:00 UTC)), NOW));
    }

    #[test]
    fn test_custom_ttl() {
        let gate = FreshnessGate::new(Duration::from_secs(900));
        let snapshot = snapshot_at(datetime!(2025-04-07 10:20:00 UTC));

        assert!(gate.is_fresh_at(&snapshot, NOW));
        assert!(!FreshnessGate::default().is_fresh_at(&snapshot, NOW));
    }

    #[test]
    fn test_age_minutes() {
        let snapshot = snapshot_at(datetime!(2025-04-07 08:00:00 UTC));
        assert_eq!(age_minutes(&snapshot, NOW), 150.0);
    }

    #[test]
    fn test_round_tenths_ties_upward() {
        assert_eq!(round_tenths(10.25), 10.3);
        assert_eq!(round_tenths(0.25), 0.3);
        assert_eq!(round_tenths(10.04), 10.0);
        assert_eq!(round_tenths(150.0), 150.0);
    }
}
