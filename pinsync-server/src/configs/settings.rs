use std::env;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::configs::normalize_path;
use crate::services::DEFAULT_CACHE_TTL;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logger {
    pub level: String,
}

impl Default for Logger {
    fn default() -> Self {
        Self { level: String::from("info") }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Cache {
    /// Maximum snapshot age before a controller is skipped
    pub ttl_seconds: u64,
    /// Snapshot fixtures loaded into the in-memory store
    pub seed_path: Option<String>,
}

impl Cache {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_CACHE_TTL.as_secs(),
            seed_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Executor {
    /// Base url of the controller command api, dry run when absent
    pub endpoint: Option<String>,
    pub timeout_ms: u64,
}

impl Executor {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logger: Logger,
    #[serde(default)]
    pub cache: Cache,
    #[serde(default)]
    pub executor: Executor,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        let builder = Config::builder()
            .add_source(File::with_name("configs/default"))
            .add_source(File::with_name(&format!("configs/{run_mode}")).required(false))
            .add_source(Environment::default().separator("__"));

        Self::from_config(builder.build()?)
    }

    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let mut settings: Settings = config.try_deserialize()?;

        if let Some(seed_path) = &settings.cache.seed_path {
            let seed_path = normalize_path(seed_path)
                .map_err(|e| ConfigError::Message(e.to_string()))?
                .to_string_lossy()
                .to_string();

            settings.cache.seed_path = Some(seed_path);
        }

        if let Some(endpoint) = &settings.executor.endpoint {
            settings.executor.endpoint = Some(endpoint.trim_end_matches('/').to_string());
        }

        Ok(settings)
    }
}
