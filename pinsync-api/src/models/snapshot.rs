use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::PinState;

/// Last observed state of all pins of one controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Device identifier, matches `Controller::uuid`
    #[serde(rename = "energyDeviceUUID")]
    pub energy_device_uuid: String,
    /// Site identifier, matches `Controller::location_uuid`
    #[serde(rename = "locationUUID")]
    pub location_uuid: String,
    /// Reported pin states keyed by pin name
    #[serde(default)]
    pub latest_data: BTreeMap<String, PinState>,
    /// Observation time
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(rename = "gatewayID", default, skip_serializing_if = "Option::is_none")]
    pub gateway_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
}

impl Snapshot {
    pub fn new(location_uuid: impl Into<String>, energy_device_uuid: impl Into<String>, timestamp: OffsetDateTime) -> Self {
        Self {
            energy_device_uuid: energy_device_uuid.into(),
            location_uuid: location_uuid.into(),
            latest_data: BTreeMap::new(),
            timestamp,
            gateway_id: None,
            serial_number: None,
            device_type: None,
        }
    }

    pub fn with_pin(mut self, name: impl Into<String>, state: PinState) -> Self {
        self.latest_data.insert(name.into(), state);
        self
    }

    /// Reported state of a pin, `Off` when the pin is not reported
    pub fn pin_state(&self, name: &str) -> PinState {
        self.latest_data.get(name).copied().unwrap_or_default()
    }
}
