//! Runtime context for CLI commands

use anyhow::{Context, Result};
use pd_api::{DataClient, HttpTransport};
use pd_core::Config;
use std::path::Path;
use std::sync::Arc;

use crate::cli::GlobalArgs;

/// Runtime context containing the loaded config and a data API client
pub struct RuntimeContext {
    /// The effective configuration
    pub config: Config,

    /// Client over the HTTP transport
    pub client: DataClient,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        let config = load_config(args, &cwd)?;

        let transport =
            HttpTransport::from_config(&config.api).context("Failed to build HTTP client")?;
        log::debug!("Data API at {}", config.api.base_url);

        Ok(Self {
            client: DataClient::new(Arc::new(transport)),
            config,
        })
    }
}

/// Resolve the effective config: an explicit `--config` file, else
/// `plotdim.yml` in `dir`, else defaults; then apply `--api-url`
pub(crate) fn load_config(args: &GlobalArgs, dir: &Path) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            Config::load(Path::new(path)).context("Failed to load configuration file")?
        }
        None if dir.join("plotdim.yml").exists() || dir.join("plotdim.yaml").exists() => {
            Config::load_from_dir(dir).context("Failed to load project configuration")?
        }
        None => {
            log::debug!("No plotdim.yml in {}, using defaults", dir.display());
            Config::default()
        }
    };

    if let Some(url) = &args.api_url {
        config.api.base_url = url.clone();
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}
