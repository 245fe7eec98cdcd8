use std::path::Path;

use anyhow::Context;
use rig_config::RigConfig;

/// Load `.env` and the layered configuration, warning about unsafe defaults.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<RigConfig> {
    let config = RigConfig::load_with_dotenv(explicit).context("failed to load rig configuration")?;
    if config.auth.is_default_secret() {
        tracing::warn!("auth.secret_key is the built-in default; set RIG_AUTH__SECRET_KEY");
    }
    Ok(config)
}

pub fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("RIG_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
