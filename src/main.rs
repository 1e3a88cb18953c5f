mod admin;
mod claims;
mod cli;
mod config;
mod error;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    admin::{AdminApi, HttpAdminClient},
    claims::{ClaimTriggerSupervisor, TokioSleeper},
    cli::Cli,
    config::Config,
};

// Initialize logging and tracing
fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,claim_trigger=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_env_file(cli: &Cli) -> anyhow::Result<()> {
    match &cli.env_file {
        Some(path) => {
            dotenv::from_path(path)
                .with_context(|| format!("failed to load env file {}", path.display()))?;
        }
        None => {
            dotenv::dotenv().ok();
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Env file first so RUST_LOG and the config layer both see it
    load_env_file(&cli)?;
    init_tracing();

    info!("🚀 Starting provider claim trigger");

    let config = match cli.config_path() {
        Some(path) => {
            info!("📄 Loading config file {}", path.display());
            Config::load(Some(&path))?
        }
        None => Config::from_env()?,
    };
    config.validate()?;

    let client = HttpAdminClient::new(config.endpoint())?;
    info!(
        endpoint = %client.endpoint().base_url(),
        interval_secs = config.interval,
        "⚙️  Admin API client configured"
    );

    let mut supervisor = ClaimTriggerSupervisor::new(config.schedule(), client, TokioSleeper);

    if cli.once {
        let report = supervisor.run_once().await;
        info!(
            cycle = report.cycle,
            claims_ok = report.claims.success,
            summary_ok = report.summary.success,
            "✓ Single claim cycle completed"
        );
        return Ok(());
    }

    tokio::select! {
        _ = supervisor.run() => {},
        _ = shutdown_signal() => {
            info!("🛑 Shutdown signal received, stopping claim trigger");
        }
    }

    Ok(())
}
