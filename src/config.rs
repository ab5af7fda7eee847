use std::fs;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::HolocronError;
use crate::store::DEFAULT_CACHE_DIR;

pub const DEFAULT_API_ROOT: &str = "https://swapi.co/api/";
pub const DEFAULT_OUTPUT: &str = "swapi.json";
pub const DEFAULT_CONFIG_FILE: &str = "holocron.json";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api_root: Option<String>,
    #[serde(default)]
    pub cache_dir: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_root: String,
    pub cache_dir: Utf8PathBuf,
    pub output: Utf8PathBuf,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Reads the config file and merges it over built-in defaults. An
    /// explicitly named path must exist; the default `holocron.json` is
    /// optional and its absence just yields the defaults.
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, HolocronError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if !config_path.exists() {
            if path.is_some() {
                return Err(HolocronError::ConfigRead(config_path));
            }
            return Ok(Self::resolve_config(Config::default()));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| HolocronError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| HolocronError::ConfigParse(err.to_string()))?;

        Ok(Self::resolve_config(config))
    }

    pub fn resolve_config(config: Config) -> ResolvedConfig {
        ResolvedConfig {
            api_root: config
                .api_root
                .unwrap_or_else(|| DEFAULT_API_ROOT.to_string()),
            cache_dir: config
                .cache_dir
                .map(Utf8PathBuf::from)
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CACHE_DIR)),
            output: config
                .output
                .map(Utf8PathBuf::from)
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT)),
        }
    }
}
