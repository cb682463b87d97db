use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Reported or requested state of a power pin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinState {
    /// Output energized
    On,
    /// Output de-energized
    #[default]
    Off,
    /// Any other reported value; never corrected
    #[serde(other)]
    Unknown,
}

impl PinState {
    pub fn flipped(self) -> Self {
        match self {
            PinState::On => PinState::Off,
            PinState::Off => PinState::On,
            PinState::Unknown => PinState::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PinState::On => "on",
            PinState::Off => "off",
            PinState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PinState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of a pin on a controller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinId(String);

impl PinId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical integer key ("0", "7", "12" but not "07"), as a JSON
    /// object enumerates them ahead of the other keys
    fn index(&self) -> Option<u32> {
        let canonical = match self.0.as_bytes() {
            [b'0'] => true,
            [b'1'..=b'9', rest @ ..] => rest.iter().all(u8::is_ascii_digit),
            _ => false,
        };

        if canonical {
            self.0.parse().ok().filter(|index| *index < u32::MAX)
        } else {
            None
        }
    }

    fn declared_cmp(&self, other: &Self) -> Ordering {
        match (self.index(), other.index()) {
            (Some(left), Some(right)) => left.cmp(&right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PinId {
    fn from(value: &str) -> Self {
        PinId(value.to_string())
    }
}

impl From<String> for PinId {
    fn from(value: String) -> Self {
        PinId(value)
    }
}

/// Pins in declared order
pub type PinMap<V> = IndexMap<PinId, V>;

/// Move integer keys to the front in ascending order, keeping every other
/// key where the document put it relative to its peers
pub fn sort_declared<V>(pins: &mut PinMap<V>) {
    pins.sort_by(|left, _, right, _| left.declared_cmp(right));
}

pub(crate) fn deserialize_declared<'de, D, V>(deserializer: D) -> Result<PinMap<V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    let mut pins = PinMap::<V>::deserialize(deserializer)?;
    sort_declared(&mut pins);
    Ok(pins)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys<V>(pins: &PinMap<V>) -> Vec<&str> {
        pins.keys().map(PinId::as_str).collect()
    }

    #[test]
    fn test_integer_pins_come_first_by_value() {
        let pins: PinMap<u8> = serde_json::from_str(r#"{"aux": 0, "10": 10, "2": 2, "1": 1}"#).unwrap();
        let mut sorted = pins.clone();
        sort_declared(&mut sorted);

        assert_eq!(keys(&pins), vec!["aux", "10", "2", "1"]);
        assert_eq!(keys(&sorted), vec!["1", "2", "10", "aux"]);
    }

    #[test]
    fn test_named_pins_keep_document_order() {
        let mut pins: PinMap<u8> = serde_json::from_str(r#"{"zeta": 0, "3": 3, "alpha": 0, "07": 7, "0": 0}"#).unwrap();
        sort_declared(&mut pins);

        assert_eq!(keys(&pins), vec!["0", "3", "zeta", "alpha", "07"]);
    }

    #[test]
    fn test_pin_state_wire_format() {
        assert_eq!(serde_json::to_string(&PinState::On).unwrap(), "\"on\"");
        assert_eq!(serde_json::from_str::<PinState>("\"off\"").unwrap(), PinState::Off);
        assert_eq!(PinState::Off.flipped(), PinState::On);
    }

    #[test]
    fn test_unexpected_pin_state_is_unknown() {
        assert_eq!(serde_json::from_str::<PinState>("\"ON\"").unwrap(), PinState::Unknown);
        assert_eq!(serde_json::from_str::<PinState>("\"offline\"").unwrap(), PinState::Unknown);
        assert_eq!(PinState::Unknown.flipped(), PinState::Unknown);
        assert_eq!(PinState::Unknown.to_string(), "unknown");
    }
}
