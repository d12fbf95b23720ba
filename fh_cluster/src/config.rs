//! Loader configuration.
//!
//! Loaded from `loader_config.json` with support for environment variable overrides.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use fh_schema::ByteOrder;
use serde::Deserialize;
use thiserror::Error;

pub const BUILTIN_LOADER_CONFIG: &str = include_str!("data/loader_config.json");

/// Names a JSON config file to use instead of the builtin default.
pub const CONFIG_PATH_ENV: &str = "FH_LOADER_CONFIG_PATH";
/// Overrides `data_path`.
pub const DATA_PATH_ENV: &str = "FH_DATA_PATH";
/// Overrides `byte_order` (`little` or `big`).
pub const BYTE_ORDER_ENV: &str = "FH_BYTE_ORDER";

const LOG_TARGET: &str = "far_horizons::config";

/// Where the game data lives and how it was written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directory holding `galaxy.dat`, `stars.dat`, `planets.dat` and `spNN.dat`.
    pub data_path: PathBuf,
    pub byte_order: ByteOrder,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("."),
            byte_order: ByteOrder::Little,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse loader config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read loader config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoaderConfig {
    /// The bundled default; falls back to [`LoaderConfig::default`] if the
    /// bundled JSON is unusable.
    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_LOADER_CONFIG).unwrap_or_else(|err| {
            tracing::warn!(
                target: LOG_TARGET,
                error = %err,
                "loader_config.builtin_invalid"
            );
            Self::default()
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = LoaderConfig::from_json_str(&contents)?;
        Ok(config)
    }

    /// Applies `FH_DATA_PATH` and `FH_BYTE_ORDER` through `lookup`.
    ///
    /// An unparsable byte order is logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(DATA_PATH_ENV) {
            tracing::info!(
                target: LOG_TARGET,
                path = %path,
                "loader_config.override=data_path"
            );
            self.data_path = PathBuf::from(path);
        }
        if let Some(order) = lookup(BYTE_ORDER_ENV) {
            match order.parse::<ByteOrder>() {
                Ok(order) => {
                    tracing::info!(
                        target: LOG_TARGET,
                        byte_order = %order,
                        "loader_config.override=byte_order"
                    );
                    self.byte_order = order;
                }
                Err(err) => tracing::warn!(
                    target: LOG_TARGET,
                    error = %err,
                    "loader_config.override_rejected"
                ),
            }
        }
    }
}

/// Load the loader configuration from the environment or the builtin default.
pub fn load_loader_config_from_env() -> LoaderConfig {
    let mut config = match env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from) {
        Some(path) => match LoaderConfig::from_file(&path) {
            Ok(config) => {
                tracing::info!(
                    target: LOG_TARGET,
                    path = %path.display(),
                    "loader_config.loaded=file"
                );
                config
            }
            Err(err) => {
                tracing::warn!(
                    target: LOG_TARGET,
                    path = %path.display(),
                    error = %err,
                    "loader_config.load_failed"
                );
                LoaderConfig::builtin()
            }
        },
        None => {
            tracing::info!(target: LOG_TARGET, "loader_config.loaded=builtin");
            LoaderConfig::builtin()
        }
    };
    config.apply_overrides(|key| env::var(key).ok());
    config
}
