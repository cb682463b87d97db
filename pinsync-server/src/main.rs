use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use pinsync_server::configs::Settings;
use pinsync_server::{load_controllers, run};

#[derive(Parser)]
#[command(name = "pinsync", version, about = "Reconcile load controller pins with their weekly schedules")]
struct Cli {
    /// Controller document, a single controller or an array of them
    #[arg(short, long)]
    controllers: PathBuf,
    /// Snapshot file used instead of `cache.seed_path`
    #[arg(short, long)]
    snapshots: Option<PathBuf>,
    /// Print the results on one line
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::new().context("Failed to load settings")?;

    if let Some(snapshots) = &cli.snapshots {
        settings.cache.seed_path = Some(snapshots.to_string_lossy().into_owned());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let app_name = env!("CARGO_PKG_NAME").replace('-', "_");
            let level = settings.logger.level.as_str();

            format!("{app_name}={level}").into()
        }))
        .with_writer(std::io::stderr)
        .init();

    let controllers = load_controllers(&cli.controllers).await?;
    let results = run(&settings, &controllers).await?;

    let output = if cli.compact {
        serde_json::to_string(&results)?
    } else {
        serde_json::to_string_pretty(&results)?
    };

    println!("{output}");

    Ok(())
}
