use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Looked up in the working directory, in this order, when `--config` is
/// not given.
const DEFAULT_CONFIG_PATHS: [&str; 2] = ["stresstea.toml", "stresstea.json"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> AppResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(ConfigFormat::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(ConfigFormat::Json),
            Some(ext) => Err(AppError::config(ConfigError::UnsupportedExtension {
                ext: ext.to_owned(),
            })),
            None => Err(AppError::config(ConfigError::MissingExtension)),
        }
    }

    fn parse<T: DeserializeOwned>(self, path: &Path, content: &str) -> AppResult<T> {
        let path = path.to_path_buf();
        match self {
            ConfigFormat::Toml => toml::from_str(content)
                .map_err(|source| AppError::config(ConfigError::ParseToml { path, source })),
            ConfigFormat::Json => serde_json::from_str(content)
                .map_err(|source| AppError::config(ConfigError::ParseJson { path, source })),
        }
    }
}

/// Loads the file named by `--config`, or the first default file present.
/// `Ok(None)` means there is nothing to layer under the CLI values.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    let chosen = match path {
        Some(path) => Some(PathBuf::from(path)),
        None => DEFAULT_CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.exists()),
    };
    let Some(chosen) = chosen else {
        return Ok(None);
    };
    tracing::debug!("Using config file {}", chosen.display());
    load_config_file(&chosen).map(Some)
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })
    })?;
    format.parse(path, &content)
}
