use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{PinMap, TimeWindow, Weekday};

/// One controllable output of a load controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinConfig {
    /// Key of this pin in the reported device state
    pub name: String,
    /// Weekly schedule, Sunday = 0; days may be missing
    #[serde(default)]
    pub schedule: BTreeMap<Weekday, TimeWindow>,
}

impl PinConfig {
    pub fn window_for(&self, weekday: Weekday) -> Option<&TimeWindow> {
        self.schedule.get(&weekday)
    }
}

/// A physical load controller and its scheduled pins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Controller {
    /// Display label, not guaranteed unique
    pub identifier: String,
    /// Device identifier in the state cache
    pub uuid: String,
    /// Site identifier in the state cache
    pub location_uuid: String,
    /// Hardware model identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_uuid: Option<String>,
    /// IANA zone name of the controller site
    pub timezone: String,
    /// Pins keyed by pin id, integer ids first, then the rest as written
    #[serde(default, deserialize_with = "super::pin::deserialize_declared")]
    pub pins: PinMap<PinConfig>,
}

impl Controller {
    /// Cache key as `(location, device)`
    pub fn cache_key(&self) -> (&str, &str) {
        (&self.location_uuid, &self.uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PinId;

    #[test]
    fn test_deserialize_form_document() {
        let controller: Controller = serde_json::from_str(
            r#"{
                "identifier": "LC-01",
                "locationUuid": "site-1",
                "pins": {
                    "2": { "name": "switch_2", "schedule": { "1": { "on": "08:00", "off": "18:00" } } },
                    "1": { "name": "switch_1", "schedule": { "0": { "on": "18:15", "off": "06:45" } } }
                },
                "typeUuid": "load_controller",
                "uuid": "device-1",
                "timezone": "US/Arizona"
            }"#,
        )
        .unwrap();

        assert_eq!(controller.cache_key(), ("site-1", "device-1"));
        assert_eq!(controller.type_uuid.as_deref(), Some("load_controller"));

        let pins: Vec<&str> = controller.pins.keys().map(PinId::as_str).collect();
        assert_eq!(pins, vec!["1", "2"]);

        let pin = &controller.pins[&PinId::from("1")];
        assert_eq!(controller.pins.get_index(0).map(|(_, pin)| pin.name.as_str()), Some("switch_1"));
        assert_eq!(pin.window_for(0), Some(&TimeWindow::new("18:15", "06:45")));
        assert_eq!(pin.window_for(1), None);
    }

    #[test]
    fn test_named_pins_follow_document() {
        let controller: Controller = serde_json::from_str(
            r#"{
                "identifier": "LC-02",
                "uuid": "device-2",
                "locationUuid": "site-1",
                "timezone": "UTC",
                "pins": {
                    "zeta": { "name": "switch_z" },
                    "2": { "name": "switch_2" },
                    "alpha": { "name": "switch_a" }
                }
            }"#,
        )
        .unwrap();

        let pins: Vec<&str> = controller.pins.keys().map(PinId::as_str).collect();
        assert_eq!(pins, vec!["2", "zeta", "alpha"]);
    }

    #[test]
    fn test_pin_without_schedule() {
        let pin: PinConfig = serde_json::from_str(r#"{ "name": "switch_1" }"#).unwrap();
        assert!(pin.schedule.is_empty());
    }
}
