mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use std::path::Path;
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads configuration from `CONFIG_PATH` (or `config.yaml`), then applies
/// environment overrides. Variables in a local `.env` file are loaded first.
pub async fn load() -> Result<Config> {
    dotenv::dotenv().ok();

    let explicit_path = env::var("CONFIG_PATH").ok();
    let config_path = explicit_path
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let mut config = if explicit_path.is_some() || Path::new(&config_path).exists() {
        debug!("Loading configuration from: {}", config_path);
        let config_str = tokio::fs::read_to_string(&config_path).await?;
        parse(&config_str)?
    } else {
        debug!("No {} found, using built-in defaults", config_path);
        Config::default()
    };

    apply_env_overrides(&mut config, |key| env::var(key).ok())?;

    Ok(config)
}

pub fn parse(config_str: &str) -> Result<Config> {
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(config_str)?)
}

/// `HF_TOKEN`, `PORT` and `BACKEND_URL` win over file values.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = lookup("HF_TOKEN").filter(|t| !t.is_empty()) {
        config.upstream.api_key = token;
    }

    if let Some(port) = lookup("PORT").filter(|p| !p.trim().is_empty()) {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
    }

    if let Some(url) = lookup("BACKEND_URL").filter(|u| !u.is_empty()) {
        config.client.backend_url = url;
    }

    Ok(())
}
