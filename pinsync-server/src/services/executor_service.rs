use pinsync_api::models::{Controller, ExecutionState, PinMap, PinState};
use reqwest::Client;
use tracing::{debug, info};

use crate::configs::Executor;
use crate::errors::ExecutorError;

/// Sends port commands to load controllers.
///
/// Without an endpoint the command is only logged.
#[derive(Clone)]
pub struct CommandExecutor {
    endpoint: Option<String>,
    client: Client,
}

impl CommandExecutor {
    pub fn new(executor: &Executor) -> Result<Self, ExecutorError> {
        let client = Client::builder().timeout(executor.timeout()).build()?;

        Ok(Self {
            endpoint: executor.endpoint.clone(),
            client,
        })
    }

    pub fn dry_run() -> Self {
        Self {
            endpoint: None,
            client: Client::new(),
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.endpoint.is_none()
    }

    pub async fn execute(
        &self,
        controller: &Controller,
        ports: &PinMap<PinState>,
    ) -> Result<(), ExecutorError> {
        let state = ExecutionState {
            identifier: controller.identifier.clone(),
            ports: ports.clone(),
        };

        info!(
            "[ACTION] API execute reExecutePin: {}",
            serde_json::to_string(&state).unwrap_or_default()
        );

        let Some(endpoint) = &self.endpoint else {
            return Ok(());
        };

        let url = command_url(endpoint, &controller.uuid);
        let response = self.client.post(&url).json(&state).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExecutorError::Rejected { status: status.as_u16() });
        }

        debug!("Controller {} accepted command at {}", controller.identifier, url);

        Ok(())
    }
}

fn command_url(endpoint: &str, device_uuid: &str) -> String {
    format!("{}/controllers/{}/ports", endpoint.trim_end_matches('/'), device_uuid)
}
