use std::path::Path;

use anyhow::Context;
use pinsync_api::models::{Controller, ControllerExecutionResult};

use crate::configs::Settings;
use crate::services::{DefaultBackend, Reconciler};

pub mod configs;
pub mod errors;
pub mod services;

/// Parse a controller document, either one controller or an array of them
pub fn parse_controllers(content: &str) -> anyhow::Result<Vec<Controller>> {
    if content.trim_start().starts_with('[') {
        serde_json::from_str(content).context("Invalid controller list")
    } else {
        let controller: Controller = serde_json::from_str(content).context("Invalid controller document")?;
        Ok(vec![controller])
    }
}

pub async fn load_controllers(path: impl AsRef<Path>) -> anyhow::Result<Vec<Controller>> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    parse_controllers(&content)
}

/// Run one reconciliation pass with the collaborators described by `settings`
pub async fn run(settings: &Settings, controllers: &[Controller]) -> anyhow::Result<Vec<ControllerExecutionResult>> {
    let backend = DefaultBackend::from_settings(settings).await?;

    tracing::info!(
        "Reconciling {} controllers against {} cached snapshots",
        controllers.len(),
        backend.snapshots.len().await
    );

    Ok(Reconciler::new(backend).reconcile(controllers).await)
}
