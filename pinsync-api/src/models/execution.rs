use serde::{Deserialize, Serialize};

use super::{PinId, PinMap, PinState, Weekday};

/// Command body sent to a controller to set its ports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionState {
    /// Controller display identifier
    pub identifier: String,
    /// Requested state per pin
    pub ports: PinMap<PinState>,
}

/// Outcome of evaluating one pin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinExecutionResult {
    pub pin: PinId,
    pub pin_name: String,
    pub current_status: PinState,
    /// Set only when a correction was warranted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_state: Option<PinState>,
    pub re_executed: bool,
    pub weekday: Weekday,
    pub on_time: String,
    pub off_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_local_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of reconciling one controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerExecutionResult {
    pub controller_id: String,
    pub success: bool,
    pub pins_executed: Vec<PinExecutionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ControllerExecutionResult {
    /// Pins for which a correction was requested
    pub fn corrected_pins(&self) -> impl Iterator<Item = &PinExecutionResult> {
        self.pins_executed.iter().filter(|pin| pin.re_executed)
    }
}
