//! Process-wide configuration, resolved once at startup.
//!
//! Precedence for the API endpoint: `--api-url` flag, then the
//! `FIELDBUILDER_API_URL` environment variable (`.env` is honored), then
//! `~/.config/fieldbuilder/config.toml`, then the local default.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://localhost:4000/graphql";
const API_URL_ENV: &str = "FIELDBUILDER_API_URL";

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_url: Option<String>,
}

impl Config {
    pub fn load(cli_api_url: Option<String>) -> Result<Self> {
        let api_url = match cli_api_url {
            Some(url) => url,
            None => match std::env::var(API_URL_ENV) {
                Ok(url) if !url.is_empty() => url,
                _ => from_file(default_config_path())?
                    .api_url
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            },
        };
        log::debug!("using API endpoint {api_url}");
        Ok(Self { api_url })
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("fieldbuilder").join("config.toml"))
}

fn from_file(path: Option<PathBuf>) -> Result<ConfigFile> {
    let Some(path) = path else {
        return Ok(ConfigFile::default());
    };
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let raw = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

/// Install the resolved config; callable once per process.
pub fn init(config: Config) -> Result<()> {
    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("configuration initialized twice"))
}

/// The process configuration. Panics only if `init` was never called, which
/// is a startup ordering bug, not a runtime condition.
pub fn global() -> &'static Config {
    CONFIG.get().expect("configuration not initialized")
}
