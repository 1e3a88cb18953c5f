use clap::Parser;
use std::path::PathBuf;

/// Periodically triggers provider claim settlement on the local admin API
#[derive(Debug, Parser)]
#[command(name = "claim-trigger", version, about)]
pub struct Cli {
    /// Config file (TOML, JSON or YAML). Falls back to $CLAIM_TRIGGER_CONFIG.
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Env file loaded before configuration is read. Defaults to ./.env if present.
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Wait for the admin API, run a single cycle, then exit
    #[arg(long)]
    pub once: bool,
}

impl Cli {
    pub fn config_path(&self) -> Option<PathBuf> {
        self.resolve_config_path(std::env::var("CLAIM_TRIGGER_CONFIG").ok())
    }

    /// `--config` wins over the environment value; blank values are ignored
    fn resolve_config_path(&self, env_value: Option<String>) -> Option<PathBuf> {
        self.config.clone().or_else(|| {
            env_value
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
        })
    }
}
