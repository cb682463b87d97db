use std::sync::Arc;

use async_trait::async_trait;
use pinsync_api::models::{
    Controller, ControllerExecutionResult, PinConfig, PinExecutionResult, PinId, PinMap, PinState, Snapshot, TimeWindow, Weekday,
};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, error, info, warn};

use crate::configs::Settings;
use crate::errors::{ExecutorError, PinError, ReconcileError, SnapshotError};
use crate::services::freshness::{age_minutes, round_tenths};
use crate::services::schedule::{PinDecision, should_execute_pin};
use crate::services::{Clock, CommandExecutor, FreshnessGate, SnapshotService, SystemClock};

/// Collaborators the reconciliation pass depends on
#[async_trait]
pub trait ReconcileBackend: Send + Sync {
    /// Last known device state; `Ok(None)` when nothing is cached
    async fn fetch_snapshot(&self, location_uuid: &str, device_uuid: &str) -> Result<Option<Snapshot>, SnapshotError>;

    /// Whether the snapshot may still be acted upon at `now`
    fn is_fresh(&self, snapshot: &Snapshot, now: OffsetDateTime) -> bool;

    /// Apply all corrections of one controller in a single call
    async fn execute_correction(
        &self,
        controller: &Controller,
        pins: &PinMap<PinState>,
    ) -> Result<(), ExecutorError>;
}

#[async_trait]
impl<T: ReconcileBackend + ?Sized> ReconcileBackend for Arc<T> {
    async fn fetch_snapshot(&self, location_uuid: &str, device_uuid: &str) -> Result<Option<Snapshot>, SnapshotError> {
        (**self).fetch_snapshot(location_uuid, device_uuid).await
    }

    fn is_fresh(&self, snapshot: &Snapshot, now: OffsetDateTime) -> bool {
        (**self).is_fresh(snapshot, now)
    }

    async fn execute_correction(
        &self,
        controller: &Controller,
        pins: &PinMap<PinState>,
    ) -> Result<(), ExecutorError> {
        (**self).execute_correction(controller, pins).await
    }
}

/// Production collaborators: in-memory snapshot cache, TTL gate, command executor
#[derive(Clone)]
pub struct DefaultBackend {
    pub snapshots: SnapshotService,
    pub freshness: FreshnessGate,
    pub executor: CommandExecutor,
}

impl DefaultBackend {
    pub async fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self {
            snapshots: SnapshotService::from_settings(&settings.cache).await?,
            freshness: FreshnessGate::new(settings.cache.ttl()),
            executor: CommandExecutor::new(&settings.executor)?,
        })
    }
}

impl Default for DefaultBackend {
    fn default() -> Self {
        Self {
            snapshots: SnapshotService::new(),
            freshness: FreshnessGate::default(),
            executor: CommandExecutor::dry_run(),
        }
    }
}

#[async_trait]
impl ReconcileBackend for DefaultBackend {
    async fn fetch_snapshot(&self, location_uuid: &str, device_uuid: &str) -> Result<Option<Snapshot>, SnapshotError> {
        Ok(self.snapshots.get(location_uuid, device_uuid).await)
    }

    fn is_fresh(&self, snapshot: &Snapshot, now: OffsetDateTime) -> bool {
        self.freshness.is_fresh_at(snapshot, now)
    }

    async fn execute_correction(
        &self,
        controller: &Controller,
        pins: &PinMap<PinState>,
    ) -> Result<(), ExecutorError> {
        self.executor.execute(controller, pins).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Valid,
    Expired,
    Missing,
}

/// Full bookkeeping of one controller pass, trimmed by [`ControllerReport::into_result`]
#[derive(Debug)]
pub struct ControllerReport {
    pub controller_id: String,
    pub controller_uuid: String,
    pub location_uuid: String,
    pub cache_status: CacheStatus,
    pub cache_age_minutes: Option<f64>,
    pub pins_executed: Vec<PinExecutionResult>,
    pub outcome: Result<(), ReconcileError>,
}

impl ControllerReport {
    fn new(controller: &Controller) -> Self {
        Self {
            controller_id: controller.identifier.clone(),
            controller_uuid: controller.uuid.clone(),
            location_uuid: controller.location_uuid.clone(),
            cache_status: CacheStatus::Valid,
            cache_age_minutes: None,
            pins_executed: Vec::new(),
            outcome: Ok(()),
        }
    }

    fn fail(mut self, error: ReconcileError) -> Self {
        self.outcome = Err(error);
        self
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn into_result(self) -> ControllerExecutionResult {
        let error = self.outcome.err().map(|e| e.to_string());

        ControllerExecutionResult {
            controller_id: self.controller_id,
            success: error.is_none(),
            pins_executed: self.pins_executed,
            error,
        }
    }
}

/// Brings reported pin states in line with their weekly schedules
pub struct Reconciler<B = DefaultBackend> {
    backend: B,
    clock: Arc<dyn Clock>,
}

impl Default for Reconciler<DefaultBackend> {
    fn default() -> Self {
        Self::new(DefaultBackend::default())
    }
}

impl<B: ReconcileBackend> Reconciler<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// One result per controller, in input order
    pub async fn reconcile(&self, controllers: &[Controller]) -> Vec<ControllerExecutionResult> {
        self.reconcile_reports(controllers)
            .await
            .into_iter()
            .map(ControllerReport::into_result)
            .collect()
    }

    pub async fn reconcile_reports(&self, controllers: &[Controller]) -> Vec<ControllerReport> {
        let mut reports = Vec::with_capacity(controllers.len());

        for controller in controllers {
            reports.push(self.reconcile_controller(controller).await);
        }

        reports
    }

    async fn reconcile_controller(&self, controller: &Controller) -> ControllerReport {
        let mut report = ControllerReport::new(controller);
        let (location_uuid, device_uuid) = controller.cache_key();

        let snapshot = match self.backend.fetch_snapshot(location_uuid, device_uuid).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                warn!("[CACHE] No cached data found for location={}, device={}", location_uuid, device_uuid);
                report.cache_status = CacheStatus::Missing;
                return report.fail(ReconcileError::CacheMiss);
            }
            Err(e) => {
                error!("Error processing {}: {}", controller.identifier, e);
                return report.fail(e.into());
            }
        };

        let now = self.clock.now_utc();
        if !self.backend.is_fresh(&snapshot, now) {
            let age = age_minutes(&snapshot, now);
            warn!("Cache expired for controller {} ({:.1} minutes old)", controller.identifier, round_tenths(age));
            report.cache_status = CacheStatus::Expired;
            report.cache_age_minutes = Some(age);
            return report.fail(ReconcileError::CacheExpired { age_minutes: age });
        }

        let weekday = self.clock.local_weekday();
        let mut pending = PinMap::new();

        for (pin, config) in &controller.pins {
            let result = evaluate_pin(controller, pin, config, &snapshot, weekday, now);

            if let Some(desired) = result.desired_state {
                pending.insert(pin.clone(), desired);
            }

            report.pins_executed.push(result);
        }

        let (updated, idle): (Vec<&PinId>, Vec<&PinId>) = controller.pins.keys().partition(|pin| pending.contains_key(*pin));

        if !pending.is_empty() {
            match self.backend.execute_correction(controller, &pending).await {
                Ok(()) => info!("Executed schedule for pins [{}] on {}", join_pins(&updated), controller.identifier),
                Err(e) => {
                    error!("Error executing schedule for {}: {}", controller.identifier, e);
                    report.outcome = Err(e.into());
                }
            }
        }

        if !idle.is_empty() {
            info!("No need to reExecute pins [{}] on {}", join_pins(&idle), controller.identifier);
        }

        report
    }
}

/// Reconcile `controllers`, falling back to the default collaborators
pub async fn reexecute_schedules<B>(controllers: &[Controller], backend: Option<B>) -> Vec<ControllerExecutionResult>
where
    B: ReconcileBackend + Default,
{
    Reconciler::new(backend.unwrap_or_default()).reconcile(controllers).await
}

fn evaluate_pin(
    controller: &Controller,
    pin: &PinId,
    config: &PinConfig,
    snapshot: &Snapshot,
    weekday: Weekday,
    now: OffsetDateTime,
) -> PinExecutionResult {
    let current_status = snapshot.pin_state(&config.name);

    let mut result = PinExecutionResult {
        pin: pin.clone(),
        pin_name: config.name.clone(),
        current_status,
        desired_state: None,
        re_executed: false,
        weekday,
        on_time: String::new(),
        off_time: String::new(),
        current_local_time: None,
        error: None,
    };

    match decide(config, current_status, &controller.timezone, weekday, now) {
        Ok((window, decision)) => {
            debug!(
                "Pin {} on {}: status={}, window={}-{}, local={}, correct={}",
                pin, controller.identifier, current_status, window.on, window.off, decision.local_time, decision.should_execute
            );

            result.on_time = window.on.clone();
            result.off_time = window.off.clone();
            result.current_local_time = Some(decision.local_time.to_string());

            if decision.should_execute {
                result.desired_state = Some(current_status.flipped());
                result.re_executed = true;
            }
        }
        Err(e) => {
            warn!("[SCHEDULE] Missing schedule for pin {} on controller {}", pin, controller.identifier);
            result.error = Some(e.to_string());
        }
    }

    result
}

fn decide<'a>(
    config: &'a PinConfig,
    status: PinState,
    timezone: &str,
    weekday: Weekday,
    now: OffsetDateTime,
) -> Result<(&'a TimeWindow, PinDecision), PinError> {
    let window = config.window_for(weekday).ok_or(PinError::MissingSchedule { weekday })?;

    Ok((window, should_execute_pin(window, status, timezone, now)))
}

fn join_pins(pins: &[&PinId]) -> String {
    pins.iter().map(|pin| pin.as_str()).collect::<Vec<_>>().join(", ")
}
