use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use pinsync_api::models::Snapshot;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::configs::Cache;
use crate::errors::SnapshotError;

type SnapshotKey = (String, String);

/// In-memory device-state cache keyed by `(location, device)`
#[derive(Clone, Default)]
pub struct SnapshotService {
    snapshots: Arc<RwLock<HashMap<SnapshotKey, Snapshot>>>,
}

impl SnapshotService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn from_settings(cache: &Cache) -> Result<Self, SnapshotError> {
        let service = Self::new();

        if let Some(seed_path) = &cache.seed_path {
            let count = service.load_from_file(seed_path).await?;
            info!("Loaded {} cached snapshots from {}", count, seed_path);
        }

        Ok(service)
    }

    /// Load a JSON array of snapshots, returning how many were stored
    pub async fn load_from_file(&self, path: impl AsRef<Path>) -> Result<usize, SnapshotError> {
        let content = tokio::fs::read_to_string(path).await?;
        let snapshots: Vec<Snapshot> = serde_json::from_str(&content)?;
        let count = snapshots.len();

        for snapshot in snapshots {
            self.insert(snapshot).await;
        }

        Ok(count)
    }

    /// Store a snapshot, replacing any previous one for the same device
    pub async fn insert(&self, snapshot: Snapshot) -> Option<Snapshot> {
        let key = (snapshot.location_uuid.clone(), snapshot.energy_device_uuid.clone());
        debug!("Cache snapshot for location={}, device={}", key.0, key.1);

        let mut snapshots = self.snapshots.write().await;
        snapshots.insert(key, snapshot)
    }

    pub async fn get(&self, location_uuid: &str, device_uuid: &str) -> Option<Snapshot> {
        let snapshots = self.snapshots.read().await;
        snapshots
            .get(&(location_uuid.to_string(), device_uuid.to_string()))
            .cloned()
    }

    pub async fn remove(&self, location_uuid: &str, device_uuid: &str) -> bool {
        let mut snapshots = self.snapshots.write().await;
        snapshots
            .remove(&(location_uuid.to_string(), device_uuid.to_string()))
            .is_some()
    }

    pub async fn len(&self) -> usize {
        self.snapshots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.snapshots.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pinsync_api::models::PinState;
    use time::macros::datetime;

    use super::*;

    fn snapshot(location: &str, device: &str) -> Snapshot {
        Snapshot::new(location, device, datetime!(2025-04-07 10:30:00 UTC)).with_pin("switch_1", PinState::On)
    }

    #[tokio::test]
    async fn test_insert_get() {
        let service = SnapshotService::new();
        service.insert(snapshot("site-1", "device-1")).await;

        let found = service.get("site-1", "device-1").await;
        assert_eq!(found, Some(snapshot("site-1", "device-1")));

        assert!(service.get("site-1", "device-2").await.is_none());
        assert!(service.get("site-2", "device-1").await.is_none());
    }

    #[tokio::test]
    async fn test_insert_replaces_previous() {
        let service = SnapshotService::new();

        assert!(service.insert(snapshot("site-1", "device-1")).await.is_none());
        let previous = service
            .insert(snapshot("site-1", "device-1").with_pin("switch_1", PinState::Off))
            .await;

        assert!(previous.is_some());
        assert_eq!(service.len().await, 1);
        assert_eq!(
            service.get("site-1", "device-1").await.unwrap().pin_state("switch_1"),
            PinState::Off
        );
    }

    #[tokio::test]
    async fn test_remove() {
        let service = SnapshotService::new();
        service.insert(snapshot("site-1", "device-1")).await;

        assert!(service.remove("site-1", "device-1").await);
        assert!(!service.remove("site-1", "device-1").await);
        assert!(service.is_empty().await);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{
                    "energyDeviceUUID": "Uuid-Valid-Cache",
                    "locationUUID": "fake-location-uuid",
                    "latestData": {{ "switch_1": "off" }},
                    "timestamp": "2025-04-07T10:30:00Z"
                }},
                {{
                    "energyDeviceUUID": "Uuid-Expired-Cache",
                    "locationUUID": "fake-location-uuid",
                    "latestData": {{ "switch_1": "on" }},
                    "timestamp": "2025-04-07T10:20:00Z"
                }}
            ]"#
        )
        .unwrap();

        let service = SnapshotService::new();
        let count = service.load_from_file(file.path()).await.unwrap();

        assert_eq!(count, 2);
        assert!(service.get("fake-location-uuid", "Uuid-Valid-Cache").await.is_some());
        assert!(service.get("fake-location-uuid", "Uuid-Expired-Cache").await.is_some());
    }

    #[tokio::test]
    async fn test_load_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "not": "an array" }}"#).unwrap();

        let result = SnapshotService::new().load_from_file(file.path()).await;
        assert!(matches!(result, Err(SnapshotError::Parse(_))));

        let result = SnapshotService::new().load_from_file("/nonexistent/snapshots.json").await;
        assert!(matches!(result, Err(SnapshotError::Io(_))));
    }
}
